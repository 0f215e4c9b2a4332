//! UI rendering module.
//!
//! This module handles all the terminal UI rendering using Ratatui.
//! The theme snapshot is taken once per frame and passed down as a
//! [`Palette`](colors::Palette).

mod colors;
mod gauges;
mod header;
mod help;
mod status;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use pulsedash::constants::layout;
use pulsedash::KeyValueStore;

use crate::app::App;

use colors::Palette;
use gauges::draw_gauges;
use header::draw_header;
use help::draw_help_overlay;
use status::{draw_commands_bar, draw_status_bar};

/// Main draw function.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let pal = Palette::new(app.palette());

    // Paint the themed background first
    frame.render_widget(
        Block::default().style(Style::default().bg(pal.bg).fg(pal.text)),
        frame.area(),
    );

    // Create the main layout: header, gauges, commands bar, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout::HEADER_HEIGHT),
            Constraint::Min(0), // Gauges
            Constraint::Length(layout::COMMANDS_BAR_HEIGHT),
            Constraint::Length(layout::STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app, &pal);
    draw_gauges(frame, chunks[1], app, &pal);
    draw_commands_bar(frame, chunks[2], &pal);
    draw_status_bar(frame, chunks[3], app, &pal);

    // Draw help overlay if enabled
    if app.show_help {
        draw_help_overlay(frame, &pal);
    }
}
