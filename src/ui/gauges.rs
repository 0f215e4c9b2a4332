//! Resource gauge rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use pulsedash::constants::layout;
use pulsedash::{KeyValueStore, Severity};

use crate::app::App;

use super::colors::Palette;

/// Draws one bar per percentage metric, followed by the network row.
pub fn draw_gauges<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, pal: &Palette) {
    let gauges = app.gauges();

    let mut constraints: Vec<Constraint> = gauges
        .iter()
        .map(|_| Constraint::Length(layout::GAUGE_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(layout::NETWORK_HEIGHT));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (gauge, row) in gauges.iter().zip(rows.iter()) {
        let fill = pal.band(gauge.band);
        let ratio = if gauge.value.is_nan() {
            0.0
        } else {
            (gauge.value / 100.0).clamp(0.0, 1.0)
        };

        let title = Line::from(vec![
            Span::styled(format!(" {} ", gauge.label), Style::default().fg(pal.text).bold()),
            band_marker(gauge.band, pal),
        ]);

        let widget = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(symbols::border::ROUNDED)
                    .border_style(Style::default().fg(pal.bar_bg))
                    .title(title),
            )
            .gauge_style(Style::default().fg(fill).bg(pal.bar_bg))
            .label(Span::styled(
                format!("{:.1}%", gauge.value),
                Style::default().fg(pal.text).bold(),
            ))
            .ratio(ratio);

        frame.render_widget(widget, *row);
    }

    draw_network(frame, rows[gauges.len()], app, pal);
}

/// Small marker next to the gauge title for non-normal bands.
fn band_marker(band: Severity, pal: &Palette) -> Span<'static> {
    match band {
        Severity::Normal => Span::raw(""),
        Severity::Warning | Severity::Critical => Span::styled(
            format!("▲ {} ", band.label()),
            Style::default().fg(pal.band(band)).bold(),
        ),
    }
}

/// Draws upload/download rates (not classified).
fn draw_network<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, pal: &Palette) {
    let line = Line::from(vec![
        Span::styled(" ↑ ", Style::default().fg(pal.accent).bold()),
        Span::styled(
            format!("{:>8.2} Mbps", app.metrics.upload),
            Style::default().fg(pal.text),
        ),
        Span::styled("   ↓ ", Style::default().fg(pal.accent).bold()),
        Span::styled(
            format!("{:>8.2} Mbps", app.metrics.download),
            Style::default().fg(pal.text),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(Style::default().fg(pal.bar_bg))
        .title(Span::styled(" NET ", Style::default().fg(pal.text).bold()));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
