//! Header rendering: title, link state and active theme.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pulsedash::KeyValueStore;

use crate::app::App;

use super::colors::Palette;

/// Draws the header with link status and theme summary.
pub fn draw_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, pal: &Palette) {
    // Link indicator
    let link = if app.host_connected {
        Span::styled(" ◈ LINKED ", Style::default().fg(pal.accent).bold())
    } else {
        Span::styled(
            " ◈ WAITING ",
            Style::default()
                .fg(pal.warning)
                .add_modifier(Modifier::SLOW_BLINK),
        )
    };

    let updated = match app.last_update {
        Some(ts) => format!("updated {}", ts.format("%H:%M:%S")),
        None => "no data yet".to_string(),
    };

    let snapshot = pal.snapshot();
    let line = Line::from(vec![
        Span::styled(" PULSE ", Style::default().fg(pal.accent).bold()),
        Span::styled("│", Style::default().fg(pal.bar_bg)),
        link,
        Span::styled("│ ", Style::default().fg(pal.bar_bg)),
        Span::styled(snapshot.mode().name(), Style::default().fg(pal.text)),
        Span::styled(" / ", Style::default().fg(pal.bar_bg)),
        Span::styled(snapshot.accent().name(), Style::default().fg(pal.accent)),
        Span::styled(" │ ", Style::default().fg(pal.bar_bg)),
        Span::styled(updated, Style::default().fg(pal.text)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(Style::default().fg(pal.bar_bg));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
