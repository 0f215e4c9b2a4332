//! Help overlay rendering.

use ratatui::{
    style::{Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use pulsedash::constants::dialog;
use pulsedash::AccentColor;

use super::colors::{rgb, Palette};
use super::utils::centered_rect;

/// Draws a help overlay popup.
pub fn draw_help_overlay(frame: &mut Frame, pal: &Palette) {
    let area = centered_rect(dialog::HELP_WIDTH, dialog::HELP_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let help = Paragraph::new(get_help_text(pal))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(pal.accent))
                .border_set(symbols::border::DOUBLE)
                .title(Line::from(vec![
                    Span::styled(" Help ", Style::default().fg(pal.text).bold()),
                    Span::styled("- Press any key to close ", Style::default().fg(pal.text)),
                ]))
                .style(Style::default().bg(pal.bg)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// Returns the help text content.
fn get_help_text(pal: &Palette) -> Text<'static> {
    let key_style = Style::default().fg(pal.accent).bold();
    let desc_style = Style::default().fg(pal.text);
    let section_style = Style::default().fg(pal.accent).bold();

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled("    ", Style::default()),
            Span::styled(key, key_style),
            Span::styled(desc, desc_style),
        ])
    };

    // One swatch per accent so the user can see what cycling will pick
    let swatches: Vec<Span> = AccentColor::ALL
        .iter()
        .flat_map(|accent| {
            [
                Span::styled("■ ", Style::default().fg(rgb(accent.rgb()))),
                Span::styled(format!("{accent}  "), desc_style),
            ]
        })
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  THEME", section_style)),
        Line::from(""),
        key_line("t          ", "Toggle dark / light"),
        key_line("a  or  →   ", "Next accent color"),
        key_line("A  or  ←   ", "Previous accent color"),
        Line::from(""),
        Line::from(Span::styled("  ACCENTS", section_style)),
        Line::from(""),
    ];
    for chunk in swatches.chunks(6) {
        let mut spans = vec![Span::raw("    ")];
        spans.extend(chunk.iter().cloned());
        lines.push(Line::from(spans));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled("  GENERAL", section_style)),
        Line::from(""),
        key_line("?  or  F1  ", "Show this help"),
        key_line("q  or  Esc ", "Quit application"),
        Line::from(""),
    ]);

    Text::from(lines)
}
