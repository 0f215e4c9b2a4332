//! Event handling module.
//!
//! This module handles keyboard and terminal events using crossterm.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use pulsedash::constants::POLL_TIMEOUT;

/// Represents the different actions a user can take in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Switch between dark and light mode
    ToggleTheme,
    /// Switch to the next accent color
    NextAccent,
    /// Switch to the previous accent color
    PrevAccent,
    /// Show or hide help
    Help,
    /// Terminal was resized; redraw
    Redraw,
}

/// Handles terminal events and converts them to application actions.
pub struct EventHandler {
    /// Timeout for polling events
    poll_timeout: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default settings.
    pub fn new() -> Self {
        Self {
            poll_timeout: POLL_TIMEOUT,
        }
    }

    /// Polls for the next event and converts it to an Action.
    ///
    /// Returns Ok(None) if no event is available within the timeout.
    pub fn next(&self) -> io::Result<Option<Action>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                // Only process key press events (not releases)
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    return Ok(self.key_to_action(key_event));
                }
                Event::Resize(_, _) => return Ok(Some(Action::Redraw)),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Converts a key event to an application action.
    pub(crate) fn key_to_action(&self, key: KeyEvent) -> Option<Action> {
        // Check for Ctrl+C first (quit)
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('a') | KeyCode::Right | KeyCode::Char('l') => Some(Action::NextAccent),
            KeyCode::Char('A') | KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevAccent),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Action::Help),

            // No matching action
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn make_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn make_ctrl_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_quit_actions() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Esc)),
            Some(Action::Quit)
        );
        assert_eq!(
            handler.key_to_action(make_ctrl_key_event(KeyCode::Char('c'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_theme_keys() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('t'))),
            Some(Action::ToggleTheme)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('a'))),
            Some(Action::NextAccent)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Right)),
            Some(Action::NextAccent)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('A'))),
            Some(Action::PrevAccent)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('h'))),
            Some(Action::PrevAccent)
        );
    }

    #[test]
    fn test_help_keys() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('?'))),
            Some(Action::Help)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::F(1))),
            Some(Action::Help)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Char('z'))),
            None
        );
        assert_eq!(handler.key_to_action(make_key_event(KeyCode::F(12))), None);
    }
}
