//! Error types for the theme store.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by [`ThemeStore`](crate::store::ThemeStore) operations.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A mutator or accessor ran before `begin()` completed
    #[error("theme store used before begin()")]
    Uninitialized,

    /// The storage backend failed; in-memory state was left unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for theme store operations
pub type Result<T> = std::result::Result<T, ThemeError>;
