//! Runtime theming and threshold coloring for a resource gauge dashboard.
//!
//! [`ThemeStore`] holds the active theme mode and accent, loads them once
//! from a [`KeyValueStore`] and writes every change straight back. The
//! [`threshold`] module maps live percentages to severity bands, and
//! [`ThemeSnapshot`] turns bands into colors for the rendering layer.

pub mod config;
pub mod constants;
pub mod error;
pub mod link;
pub mod storage;
pub mod store;
pub mod theme;
pub mod threshold;

pub use error::ThemeError;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{Selection, ThemeSnapshot, ThemeStore};
pub use theme::{AccentColor, Rgb, ThemeMode};
pub use threshold::{classify, Severity, ThresholdConfig};
