//! Terminal colors derived from the active theme snapshot.
//!
//! Every color the UI draws comes from one [`ThemeSnapshot`] taken at the
//! start of the frame, so a frame never mixes two selections.

use ratatui::style::Color;

use pulsedash::{Rgb, Severity, ThemeSnapshot};

/// Converts a palette color to a terminal color.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Frame-wide terminal palette.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Screen background
    pub bg: Color,
    /// Regular text
    pub text: Color,
    /// Unfilled part of gauges, borders and muted text
    pub bar_bg: Color,
    /// Titles, highlights and normal-band gauges
    pub accent: Color,
    pub warning: Color,
    pub critical: Color,
    snapshot: ThemeSnapshot,
}

impl Palette {
    pub fn new(snapshot: ThemeSnapshot) -> Self {
        Self {
            bg: rgb(snapshot.bg_color()),
            text: rgb(snapshot.text_color()),
            bar_bg: rgb(snapshot.bar_bg_color()),
            accent: rgb(snapshot.accent_color_value()),
            warning: rgb(snapshot.warning_color()),
            critical: rgb(snapshot.critical_color()),
            snapshot,
        }
    }

    /// Gauge fill color for a band.
    pub fn band(&self, band: Severity) -> Color {
        rgb(self.snapshot.severity_color(band))
    }

    pub fn snapshot(&self) -> &ThemeSnapshot {
        &self.snapshot
    }
}
