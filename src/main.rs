//! Pulse dashboard
//!
//! Terminal rendition of the resource gauge display. Metrics and theme
//! changes arrive as protocol lines on stdin (or from a synthetic feed with
//! `--demo`); keys switch theme and accent, and the selection is persisted
//! across restarts.

mod app;
mod event;
mod feed;
mod ui;

use std::fs::OpenOptions;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use pulsedash::config::{Overrides, Settings};
use pulsedash::{FileStore, KeyValueStore, ThemeStore};

use crate::app::App;
use crate::event::EventHandler;
use crate::feed::FeedEvent;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "pulsedash", version, about = "Themed resource gauge dashboard")]
struct Cli {
    /// Settings file (default: <config dir>/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preference store file
    #[arg(long)]
    store: Option<PathBuf>,

    /// Default theme when none is persisted (dark, light)
    #[arg(long, env = "PULSE_THEME")]
    theme: Option<String>,

    /// Default accent when none is persisted (sapphire, mauve, ...)
    #[arg(long, env = "PULSE_ACCENT")]
    accent: Option<String>,

    /// Generate synthetic metrics instead of reading stdin
    #[arg(long)]
    demo: bool,

    /// Run without the terminal UI and log each frame
    #[arg(long)]
    headless: bool,

    /// Write logs to this file (the terminal UI discards logs otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Installs the tracing subscriber. Headless mode logs to stderr; the
/// terminal UI only logs when a file is given.
fn init_logging(headless: bool, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pulsedash=info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Entry point for the application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keys and protocol lines cannot share the same terminal
    if !cli.demo && !cli.headless && std::io::stdin().is_terminal() {
        bail!("no metrics feed: pipe protocol lines into stdin or pass --demo");
    }

    let overrides = Overrides {
        theme: cli.theme.clone(),
        accent: cli.accent.clone(),
        store_path: cli.store.clone(),
        log_file: cli.log_file.clone(),
    };
    let settings =
        Settings::resolve(cli.config.as_deref(), overrides).context("Failed to load settings")?;

    init_logging(cli.headless, settings.log_file.as_deref())?;
    debug!("pulsedash v{} starting", env!("CARGO_PKG_VERSION"));

    // Open the persisted selection and load it once
    let backend =
        FileStore::open(&settings.store_path).context("Failed to open preference store")?;
    info!(store = %backend.path().display(), "opened preference store");
    let store = Arc::new(ThemeStore::new(backend, settings.defaults));
    store.begin().context("Failed to load theme selection")?;

    // Start the metrics feed. The stdin thread is left blocked on its read
    // at exit; the demo task is aborted.
    let (tx, rx) = mpsc::unbounded_channel();
    let (demo_feed, _stdin_feed) = if cli.demo {
        (Some(feed::spawn_demo_feed(tx)), None)
    } else {
        (None, Some(feed::spawn_stdin_feed(Arc::clone(&store), tx)))
    };

    let app = App::new(store, settings.thresholds);
    let result = if cli.headless {
        run_headless(app, rx).await
    } else {
        // Initialize the terminal
        let terminal = ratatui::init();
        let result = run_app(terminal, app, rx);
        // Restore the terminal to its original state
        ratatui::restore();
        result
    };

    if let Some(handle) = demo_feed {
        handle.abort();
    }
    result
}

/// Main application loop.
///
/// 1. Apply everything the feed sent since the last frame
/// 2. Draw if anything changed
/// 3. Handle user input
/// 4. Repeat until the user quits
fn run_app<S: KeyValueStore>(
    mut terminal: ratatui::DefaultTerminal,
    mut app: App<S>,
    mut rx: mpsc::UnboundedReceiver<FeedEvent>,
) -> Result<()> {
    let event_handler = EventHandler::new();

    loop {
        while let Ok(event) = rx.try_recv() {
            app.handle_feed(event);
        }

        if app.needs_redraw {
            terminal
                .draw(|frame| ui::draw(frame, &app))
                .context("Failed to draw UI")?;
            app.needs_redraw = false;
        }

        if let Some(action) = event_handler.next()? {
            if app.handle_action(action) {
                break;
            }
        }
    }

    Ok(())
}

/// Headless loop: no terminal UI, one log line per metrics frame.
async fn run_headless<S: KeyValueStore>(
    mut app: App<S>,
    mut rx: mpsc::UnboundedReceiver<FeedEvent>,
) -> Result<()> {
    while let Some(event) = rx.recv().await {
        match &event {
            FeedEvent::Metrics(_) => {}
            FeedEvent::Handshake { reply: Some(device_id) } => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{device_id}").context("Failed to answer handshake")?;
                stdout.flush().context("Failed to answer handshake")?;
            }
            FeedEvent::Handshake { reply: None } => warn!("handshake from unknown host"),
            FeedEvent::ThemeChanged(update) => {
                info!(theme = ?update.mode, accent = ?update.accent, "theme message applied")
            }
            FeedEvent::Rejected(reason) => warn!(%reason, "line rejected"),
            FeedEvent::Closed => {
                info!("input closed");
                break;
            }
        }

        let is_metrics = matches!(event, FeedEvent::Metrics(_));
        app.handle_feed(event);
        if is_metrics {
            let palette = app.palette();
            for gauge in app.gauges() {
                info!(
                    metric = gauge.label,
                    value = gauge.value,
                    band = gauge.band.label(),
                    color = %palette.severity_color(gauge.band),
                    "frame"
                );
            }
        }
    }
    Ok(())
}
