//! Theme store: the single source of truth for the active palette.
//!
//! The store starts inert. `begin()` performs the one-time load from the
//! key-value backend; after that, mutators write through to storage before
//! updating memory, so a failed write leaves the last known-good selection
//! in place. Backend and selection live behind one mutex, and readers take a
//! [`ThemeSnapshot`] so mode and accent are always observed together.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::constants::storage::{ACCENT_KEY, NAMESPACE, THEME_KEY};
use crate::error::{Result, ThemeError};
use crate::storage::KeyValueStore;
use crate::theme::{AccentColor, Rgb, ThemeMode, CRITICAL_COLOR, WARNING_COLOR};
use crate::threshold::{color_for, Severity};

/// A theme mode and accent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub mode: ThemeMode,
    pub accent: AccentColor,
}

impl Default for Selection {
    /// Light / Sapphire.
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            accent: AccentColor::Sapphire,
        }
    }
}

/// Consistent view of the selection with total color accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSnapshot {
    selection: Selection,
}

impl ThemeSnapshot {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }

    pub fn mode(&self) -> ThemeMode {
        self.selection.mode
    }

    pub fn accent(&self) -> AccentColor {
        self.selection.accent
    }

    pub fn accent_color_value(&self) -> Rgb {
        self.selection.accent.rgb()
    }

    pub fn bg_color(&self) -> Rgb {
        self.selection.mode.bg_color()
    }

    pub fn text_color(&self) -> Rgb {
        self.selection.mode.text_color()
    }

    pub fn bar_bg_color(&self) -> Rgb {
        self.selection.mode.bar_bg_color()
    }

    pub fn warning_color(&self) -> Rgb {
        WARNING_COLOR
    }

    pub fn critical_color(&self) -> Rgb {
        CRITICAL_COLOR
    }

    /// Gauge color for a band: accent, warning or critical.
    pub fn severity_color(&self, band: Severity) -> Rgb {
        color_for(
            band,
            self.accent_color_value(),
            WARNING_COLOR,
            CRITICAL_COLOR,
        )
    }
}

struct Inner<S> {
    backend: S,
    /// `None` until `begin()` succeeds.
    current: Option<Selection>,
}

/// Owns the current theme selection and its persistence.
pub struct ThemeStore<S> {
    defaults: Selection,
    inner: Mutex<Inner<S>>,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Creates an inert store. No storage access happens until `begin()`.
    pub fn new(backend: S, defaults: Selection) -> Self {
        Self {
            defaults,
            inner: Mutex::new(Inner {
                backend,
                current: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the persisted selection. Only the first successful call reads
    /// storage; later calls return immediately.
    pub fn begin(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.current.is_some() {
            debug!("theme store already initialized");
            return Ok(());
        }

        let raw_mode = inner
            .backend
            .get_int(NAMESPACE, THEME_KEY, self.defaults.mode.ordinal())?;
        let raw_accent = inner
            .backend
            .get_int(NAMESPACE, ACCENT_KEY, self.defaults.accent.ordinal())?;

        let mode = ThemeMode::from_ordinal(raw_mode).unwrap_or_else(|| {
            warn!(value = raw_mode, fallback = %self.defaults.mode, "stored theme out of range");
            self.defaults.mode
        });
        let accent = AccentColor::from_ordinal(raw_accent).unwrap_or_else(|| {
            warn!(value = raw_accent, fallback = %self.defaults.accent, "stored accent out of range");
            self.defaults.accent
        });

        inner.current = Some(Selection { mode, accent });
        info!(theme = %mode, accent = %accent, "theme store initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().current.is_some()
    }

    /// Switches the theme mode and persists it under the `theme` key.
    ///
    /// The caller is responsible for requesting a redraw.
    pub fn set_theme(&self, mode: ThemeMode) -> Result<()> {
        let mut inner = self.lock();
        let current = inner.current.ok_or(ThemeError::Uninitialized)?;

        inner.backend.put_int(NAMESPACE, THEME_KEY, mode.ordinal())?;
        inner.current = Some(Selection { mode, ..current });
        info!(theme = %mode, "theme changed");
        Ok(())
    }

    /// Switches the accent color and persists it under the `accent` key.
    pub fn set_accent_color(&self, accent: AccentColor) -> Result<()> {
        let mut inner = self.lock();
        let current = inner.current.ok_or(ThemeError::Uninitialized)?;

        inner
            .backend
            .put_int(NAMESPACE, ACCENT_KEY, accent.ordinal())?;
        inner.current = Some(Selection { accent, ..current });
        info!(accent = %accent, "accent changed");
        Ok(())
    }

    pub fn get_theme(&self) -> Result<ThemeMode> {
        Ok(self.snapshot()?.mode())
    }

    pub fn get_accent_color(&self) -> Result<AccentColor> {
        Ok(self.snapshot()?.accent())
    }

    /// Reads mode and accent together under the lock.
    pub fn snapshot(&self) -> Result<ThemeSnapshot> {
        self.lock()
            .current
            .map(ThemeSnapshot::new)
            .ok_or(ThemeError::Uninitialized)
    }

    /// Selection used for absent or out-of-range stored values.
    pub fn defaults(&self) -> Selection {
        self.defaults
    }
}
