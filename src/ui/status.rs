//! Status bar and commands bar rendering.

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pulsedash::KeyValueStore;

use crate::app::App;

use super::colors::Palette;

/// Keys shown in the commands bar.
const COMMANDS: [(&str, &str); 4] = [
    ("t", "theme"),
    ("a/A", "accent"),
    ("?", "help"),
    ("q", "quit"),
];

/// Draws the commands bar showing available actions.
pub fn draw_commands_bar(frame: &mut Frame, area: Rect, pal: &Palette) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default())];

    for (i, (key, desc)) in COMMANDS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(pal.bar_bg)));
        }
        spans.push(Span::styled(*key, Style::default().fg(pal.accent).bold()));
        spans.push(Span::styled(" ", Style::default()));
        spans.push(Span::styled(*desc, Style::default().fg(pal.text)));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(pal.bar_bg));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draws the status bar at the bottom (for messages).
pub fn draw_status_bar<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, pal: &Palette) {
    let (text, style) = if let Some(status) = &app.status {
        let style = if status.is_error {
            Style::default().fg(pal.critical)
        } else {
            Style::default().fg(pal.accent)
        };
        (format!(" {} ", status.text), style)
    } else {
        (" Ready".to_string(), Style::default().fg(pal.text))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
