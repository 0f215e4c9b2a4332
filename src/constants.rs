//! Application-wide constants.
//!
//! Centralizes thresholds, storage keys and timing values for maintainability.

use std::time::Duration;

/// Percentage at which a gauge enters the warning band.
pub const WARNING_THRESHOLD: f64 = 80.0;
/// Percentage at which a gauge enters the critical band.
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Event polling timeout - balances responsiveness with CPU usage.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Interval between synthetic metric frames in demo mode.
pub const DEMO_INTERVAL: Duration = Duration::from_secs(1);

/// Keys used in the persistent key-value store.
pub mod storage {
    /// Namespace holding the theme selection.
    pub const NAMESPACE: &str = "config";
    /// Key for the theme mode ordinal.
    pub const THEME_KEY: &str = "theme";
    /// Key for the accent color ordinal.
    pub const ACCENT_KEY: &str = "accent";
    /// File name of the store inside the data directory.
    pub const STORE_FILE: &str = "prefs.json";
    /// File name of the settings file inside the config directory.
    pub const SETTINGS_FILE: &str = "config.toml";
}

/// Layout dimensions for the main UI structure.
pub mod layout {
    /// Header height (title line and theme summary).
    pub const HEADER_HEIGHT: u16 = 3;
    /// Height of a single gauge row.
    pub const GAUGE_HEIGHT: u16 = 3;
    /// Height of the network rates row.
    pub const NETWORK_HEIGHT: u16 = 3;
    /// Commands bar height.
    pub const COMMANDS_BAR_HEIGHT: u16 = 3;
    /// Status bar height.
    pub const STATUS_BAR_HEIGHT: u16 = 1;
}

/// Dialog dimensions (percentages of screen size).
pub mod dialog {
    /// Help overlay width percentage.
    pub const HELP_WIDTH: u16 = 55;
    /// Help overlay height percentage.
    pub const HELP_HEIGHT: u16 = 60;
}
