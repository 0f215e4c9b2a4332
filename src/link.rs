//! Line protocol spoken by the host metrics agent.
//!
//! Each message is one JSON object per line:
//!
//! ```text
//! {"type":"handshake","data":"ed1d2a7c8af14a27b77b1c127d806aed"}
//! {"type":"metrics","data":{"cpu":12.5,"memory":48.1,"gpu":0,"upload":0.4,"download":3.2,"disk":61.0}}
//! {"type":"theme","data":{"variant":"dark","accent":""}}
//! ```
//!
//! In a `theme` message an empty field leaves that part of the selection
//! unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::ThemeError;
use crate::storage::KeyValueStore;
use crate::store::ThemeStore;
use crate::theme::{AccentColor, ThemeMode, UnknownName};

/// Identifier the display answers a valid handshake with.
pub const DEVICE_ID: &str = "91d8141364e544e181fca2382cd6751a";
/// Identifier the host agent sends in its handshake.
pub const HOST_ID: &str = "ed1d2a7c8af14a27b77b1c127d806aed";

/// Errors while decoding or applying a link message.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownName(#[from] UnknownName),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// Some fields were persisted before a later one failed
    #[error("theme message only partly applied: {source}")]
    Partial {
        applied: ThemeUpdate,
        #[source]
        source: ThemeError,
    },
}

/// Averaged host metrics. Percentages except `upload`/`download` (Mbps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsData {
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub memory: f64,
    #[serde(default)]
    pub gpu: f64,
    #[serde(default)]
    pub upload: f64,
    #[serde(default)]
    pub download: f64,
    #[serde(default)]
    pub disk: f64,
}

/// Requested theme change; empty strings mean "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeData {
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub accent: String,
}

/// A single message on the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Message {
    Handshake(String),
    Metrics(MetricsData),
    Theme(ThemeData),
}

/// Decodes one line of input.
pub fn decode_line(line: &str) -> Result<Message, LinkError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Encodes a message as one newline-terminated line.
pub fn encode_line(message: &Message) -> Result<String, LinkError> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// The display's reply to a handshake, if the host is the expected one.
pub fn handshake_reply(host_id: &str) -> Option<&'static str> {
    (host_id == HOST_ID).then_some(DEVICE_ID)
}

/// What a theme message actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeUpdate {
    pub mode: Option<ThemeMode>,
    pub accent: Option<AccentColor>,
}

impl ThemeUpdate {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.accent.is_none()
    }
}

/// Parses both fields of a theme message. Empty fields yield `None`.
pub fn parse_theme(data: &ThemeData) -> Result<ThemeUpdate, LinkError> {
    let mode = match data.variant.trim() {
        "" => None,
        name => Some(name.parse::<ThemeMode>()?),
    };
    let accent = match data.accent.trim() {
        "" => None,
        name => Some(name.parse::<AccentColor>()?),
    };
    Ok(ThemeUpdate { mode, accent })
}

/// Applies a theme message through the store mutators, mode first.
///
/// Nothing is applied if either name is unknown. If the mode is persisted
/// but the accent write then fails, the error is [`LinkError::Partial`] and
/// carries the part that did change.
pub fn apply_theme<S: KeyValueStore>(
    store: &ThemeStore<S>,
    data: &ThemeData,
) -> Result<ThemeUpdate, LinkError> {
    let update = parse_theme(data).inspect_err(|err| {
        warn!(error = %err, "ignoring theme message");
    })?;

    if let Some(mode) = update.mode {
        store.set_theme(mode)?;
    }
    if let Some(accent) = update.accent {
        if let Err(source) = store.set_accent_color(accent) {
            if update.mode.is_none() {
                return Err(source.into());
            }
            return Err(LinkError::Partial {
                applied: ThemeUpdate {
                    accent: None,
                    ..update
                },
                source,
            });
        }
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage::ACCENT_KEY;
    use crate::storage::{MemoryStore, StorageError};
    use crate::store::Selection;

    /// Accepts everything except accent writes.
    #[derive(Clone, Default)]
    struct AccentWritesFail(MemoryStore);

    impl KeyValueStore for AccentWritesFail {
        fn get_int(
            &mut self,
            namespace: &str,
            key: &str,
            default: i32,
        ) -> Result<i32, StorageError> {
            self.0.get_int(namespace, key, default)
        }

        fn put_int(
            &mut self,
            namespace: &str,
            key: &str,
            value: i32,
        ) -> Result<(), StorageError> {
            if key == ACCENT_KEY {
                return Err(StorageError::Io {
                    path: "flash".into(),
                    source: std::io::Error::other("write failed"),
                });
            }
            self.0.put_int(namespace, key, value)
        }
    }

    fn started() -> ThemeStore<MemoryStore> {
        let store = ThemeStore::new(MemoryStore::new(), Selection::default());
        store.begin().unwrap();
        store
    }

    #[test]
    fn test_decode_metrics() {
        let line = r#"{"type":"metrics","data":{"cpu":12.5,"memory":48.1,"gpu":0,"upload":0.4,"download":3.2,"disk":61}}"#;
        let Message::Metrics(metrics) = decode_line(line).unwrap() else {
            panic!("expected metrics");
        };
        assert_eq!(metrics.cpu, 12.5);
        assert_eq!(metrics.disk, 61.0);
        assert_eq!(metrics.download, 3.2);
    }

    #[test]
    fn test_decode_handshake_and_reply() {
        let line = format!(r#"{{"type":"handshake","data":"{HOST_ID}"}}"#);
        assert_eq!(
            decode_line(&line).unwrap(),
            Message::Handshake(HOST_ID.to_string())
        );
        assert_eq!(handshake_reply(HOST_ID), Some(DEVICE_ID));
        assert_eq!(handshake_reply("someone-else"), None);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_line("not json"),
            Err(LinkError::Malformed(_))
        ));
        assert!(decode_line(r#"{"type":"reboot","data":null}"#).is_err());
    }

    #[test]
    fn test_encoded_line_is_newline_terminated() {
        let line = encode_line(&Message::Theme(ThemeData {
            variant: "dark".into(),
            accent: String::new(),
        }))
        .unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.starts_with(r#"{"type":"theme","data":{"variant":"dark""#));
    }

    #[test]
    fn test_apply_theme_with_empty_fields() {
        let store = started();

        let update = apply_theme(
            &store,
            &ThemeData {
                variant: "dark".into(),
                accent: String::new(),
            },
        )
        .unwrap();
        assert_eq!(update.mode, Some(ThemeMode::Dark));
        assert_eq!(update.accent, None);
        assert_eq!(store.get_accent_color().unwrap(), AccentColor::Sapphire);

        apply_theme(
            &store,
            &ThemeData {
                variant: String::new(),
                accent: "Maroon".into(),
            },
        )
        .unwrap();
        assert_eq!(store.get_theme().unwrap(), ThemeMode::Dark);
        assert_eq!(store.get_accent_color().unwrap(), AccentColor::Maroon);

        let update = apply_theme(&store, &ThemeData::default()).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_apply_theme_unknown_name_changes_nothing() {
        let store = started();
        let err = apply_theme(
            &store,
            &ThemeData {
                variant: "dark".into(),
                accent: "neon".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, LinkError::UnknownName(_)));
        assert_eq!(store.get_theme().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn test_apply_theme_before_begin() {
        let store = ThemeStore::new(MemoryStore::new(), Selection::default());
        let err = apply_theme(
            &store,
            &ThemeData {
                variant: "light".into(),
                accent: String::new(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, LinkError::Theme(ThemeError::Uninitialized)));
    }

    #[test]
    fn test_apply_theme_reports_partial_change() {
        let store = ThemeStore::new(AccentWritesFail::default(), Selection::default());
        store.begin().unwrap();

        let err = apply_theme(
            &store,
            &ThemeData {
                variant: "dark".into(),
                accent: "mauve".into(),
            },
        )
        .unwrap_err();

        let LinkError::Partial { applied, source } = err else {
            panic!("expected a partial update, got {err:?}");
        };
        assert_eq!(applied.mode, Some(ThemeMode::Dark));
        assert_eq!(applied.accent, None);
        assert!(matches!(source, ThemeError::Storage(_)));
        assert_eq!(store.get_theme().unwrap(), ThemeMode::Dark);
        assert_eq!(store.get_accent_color().unwrap(), AccentColor::Sapphire);

        // With no mode requested there is nothing partial about the failure
        let err = apply_theme(
            &store,
            &ThemeData {
                variant: String::new(),
                accent: "mauve".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, LinkError::Theme(ThemeError::Storage(_))));
    }
}
