//! Background input feeds.
//!
//! A feed runs in the background and forwards [`FeedEvent`]s to the
//! render loop. Theme messages are applied to the shared store right here,
//! so the render loop only has to redraw.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use pulsedash::constants::DEMO_INTERVAL;
use pulsedash::link::{self, Message, MetricsData, ThemeUpdate};
use pulsedash::{KeyValueStore, ThemeStore};

/// Something the render loop should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A new metrics frame
    Metrics(MetricsData),
    /// The theme store was changed by the host
    ThemeChanged(ThemeUpdate),
    /// A host said hello; `reply` is set when it is the expected host
    Handshake { reply: Option<&'static str> },
    /// A line could not be used
    Rejected(String),
    /// The input stream ended
    Closed,
}

/// Decodes one protocol line and applies it.
pub fn handle_line<S: KeyValueStore>(store: &ThemeStore<S>, line: &str) -> Option<FeedEvent> {
    if line.trim().is_empty() {
        return None;
    }

    let event = match link::decode_line(line) {
        Ok(Message::Metrics(metrics)) => FeedEvent::Metrics(metrics),
        Ok(Message::Handshake(host_id)) => FeedEvent::Handshake {
            reply: link::handshake_reply(&host_id),
        },
        Ok(Message::Theme(data)) => match link::apply_theme(store, &data) {
            Ok(update) => FeedEvent::ThemeChanged(update),
            Err(err) => FeedEvent::Rejected(err.to_string()),
        },
        Err(err) => {
            warn!(error = %err, "dropping link line");
            FeedEvent::Rejected(err.to_string())
        }
    };
    Some(event)
}

/// Reads protocol lines from stdin until EOF.
///
/// Runs on a plain thread: a blocking stdin read must not hold up runtime
/// shutdown.
pub fn spawn_stdin_feed<S>(
    store: Arc<ThemeStore<S>>,
    tx: UnboundedSender<FeedEvent>,
) -> thread::JoinHandle<()>
where
    S: KeyValueStore + Send + 'static,
{
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if let Some(event) = handle_line(&store, &line) {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "stdin feed failed");
                    break;
                }
            }
        }
        debug!("stdin feed closed");
        let _ = tx.send(FeedEvent::Closed);
    })
}

/// Synthetic metrics frame for tick `n`: slow waves that sweep every band.
pub fn demo_metrics(n: u64) -> MetricsData {
    let t = n as f64;
    let wave = |period: f64, phase: f64| {
        50.0 + 50.0 * ((t / period) * std::f64::consts::TAU + phase).sin()
    };
    MetricsData {
        cpu: wave(40.0, 0.0),
        memory: wave(90.0, 1.0),
        gpu: wave(25.0, 2.0),
        upload: wave(15.0, 0.5) / 10.0,
        download: wave(20.0, 1.5),
        disk: 55.0 + 40.0 * (t / 300.0).min(1.0),
    }
}

/// Emits a synthetic metrics frame every [`DEMO_INTERVAL`].
pub fn spawn_demo_feed(tx: UnboundedSender<FeedEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(DEMO_INTERVAL);
        let mut n = 0u64;
        loop {
            ticker.tick().await;
            if tx.send(FeedEvent::Metrics(demo_metrics(n))).is_err() {
                break;
            }
            n += 1;
        }
    })
}
