//! Application state and logic.
//!
//! The app owns nothing about colors itself: it asks the shared theme store
//! for a snapshot every frame and forwards key presses to the store's
//! mutators. Requesting a redraw after a change is this layer's job.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::error;

use pulsedash::link::MetricsData;
use pulsedash::{KeyValueStore, Severity, ThemeSnapshot, ThemeStore, ThresholdConfig};

use crate::event::Action;
use crate::feed::FeedEvent;

/// Status message to display to the user.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text
    pub text: String,
    /// Whether this is an error message
    pub is_error: bool,
}

/// One percentage gauge row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub label: &'static str,
    pub value: f64,
    pub band: Severity,
}

/// Main application state.
pub struct App<S> {
    /// Shared with the feed task
    store: Arc<ThemeStore<S>>,
    pub thresholds: ThresholdConfig,
    /// Latest metrics frame
    pub metrics: MetricsData,
    /// When the latest metrics frame arrived
    pub last_update: Option<DateTime<Local>>,
    /// Has a known host completed the handshake?
    pub host_connected: bool,
    /// Status message to display
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    /// Set whenever the screen must be repainted
    pub needs_redraw: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the app around an already started theme store.
    pub fn new(store: Arc<ThemeStore<S>>, thresholds: ThresholdConfig) -> Self {
        Self {
            store,
            thresholds,
            metrics: MetricsData::default(),
            last_update: None,
            host_connected: false,
            status: None,
            show_help: false,
            needs_redraw: true,
        }
    }

    /// Palette for the current frame, falling back to the store defaults if
    /// the store was never started.
    pub fn palette(&self) -> ThemeSnapshot {
        self.store
            .snapshot()
            .unwrap_or_else(|_| ThemeSnapshot::new(self.store.defaults()))
    }

    /// Percentage gauges with their bands.
    pub fn gauges(&self) -> [Gauge; 4] {
        let gauge = |label, value| Gauge {
            label,
            value,
            band: self.thresholds.classify(value),
        };
        [
            gauge("CPU", self.metrics.cpu),
            gauge("MEM", self.metrics.memory),
            gauge("GPU", self.metrics.gpu),
            gauge("DISK", self.metrics.disk),
        ]
    }

    /// Handles an action and returns true if the app should quit.
    pub fn handle_action(&mut self, action: Action) -> bool {
        // Handle help toggle from any view
        if action == Action::Help {
            self.show_help = !self.show_help;
            self.needs_redraw = true;
            return false;
        }

        // If help is showing, any key closes it; a resize only repaints
        if self.show_help && !matches!(action, Action::Quit | Action::Redraw) {
            self.show_help = false;
            self.needs_redraw = true;
            return false;
        }

        match action {
            Action::Quit => return true,
            Action::ToggleTheme => {
                let next = self.palette().mode().toggled();
                match self.store.set_theme(next) {
                    Ok(()) => self.set_status(&format!("Theme: {next}"), false),
                    Err(e) => self.report_error("Failed to change theme", &e),
                }
            }
            Action::NextAccent | Action::PrevAccent => {
                let current = self.palette().accent();
                let next = if action == Action::NextAccent {
                    current.next()
                } else {
                    current.prev()
                };
                match self.store.set_accent_color(next) {
                    Ok(()) => self.set_status(&format!("Accent: {next}"), false),
                    Err(e) => self.report_error("Failed to change accent", &e),
                }
            }
            Action::Redraw | Action::Help => {}
        }
        self.needs_redraw = true;
        false
    }

    /// Handles an event from the background feed.
    pub fn handle_feed(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Metrics(metrics) => {
                self.metrics = metrics;
                self.last_update = Some(Local::now());
            }
            FeedEvent::ThemeChanged(update) => {
                if !update.is_empty() {
                    let snapshot = self.palette();
                    self.set_status(
                        &format!("Host set theme {} / {}", snapshot.mode(), snapshot.accent()),
                        false,
                    );
                }
            }
            FeedEvent::Handshake { reply } => {
                // The terminal owns stdout here, so the device ID is only
                // written back in headless mode.
                self.host_connected = reply.is_some();
                if self.host_connected {
                    self.set_status("Host connected", false);
                } else {
                    self.set_status("Unknown host rejected", true);
                }
            }
            FeedEvent::Rejected(reason) => self.set_status(&reason, true),
            FeedEvent::Closed => {
                self.host_connected = false;
                self.set_status("Metrics feed closed", true);
            }
        }
        self.needs_redraw = true;
    }

    // --- Status message helpers ---

    fn report_error(&mut self, context: &str, err: &dyn std::error::Error) {
        error!(error = %err, "{context}");
        self.set_status(&format!("{context}: {err}"), true);
    }

    fn set_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
        });
    }
}
