//! Startup settings.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! overrides from the environment and command line. The resulting
//! [`Settings`] seeds the theme store; whatever is persisted in the store
//! still wins over the configured default selection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::constants::storage::{SETTINGS_FILE, STORE_FILE};
use crate::constants::{CRITICAL_THRESHOLD, WARNING_THRESHOLD};
use crate::store::Selection;
use crate::theme::{AccentColor, ThemeMode, UnknownName};
use crate::threshold::{ThresholdConfig, ThresholdError};

/// Errors while resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    UnknownName(#[from] UnknownName),

    #[error("invalid thresholds: {0}")]
    Threshold(#[from] ThresholdError),

    #[error("could not determine a data directory; pass --store")]
    NoDataDir,
}

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub theme: Option<String>,
    pub accent: Option<String>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
    pub store_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl SettingsFile {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads a settings file. With `required == false` a missing file is
    /// treated as empty.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded settings file");
                Self::from_toml_str(&contents)
            }
            Err(err) if !required && err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Overrides taken from the environment and command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub theme: Option<String>,
    pub accent: Option<String>,
    pub store_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved startup settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Selection used when nothing valid is persisted
    pub defaults: Selection,
    pub thresholds: ThresholdConfig,
    pub store_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "pulse", "pulsedash")
}

/// Default location of `config.toml`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Default location of the preference store.
pub fn default_store_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(STORE_FILE))
}

impl Settings {
    /// Merges a settings file with overrides. Overrides win.
    pub fn merge(file: SettingsFile, overrides: Overrides) -> Result<Self, ConfigError> {
        let defaults = Selection::default();

        let mode = match overrides.theme.or(file.theme) {
            Some(name) => name.parse::<ThemeMode>()?,
            None => defaults.mode,
        };
        let accent = match overrides.accent.or(file.accent) {
            Some(name) => name.parse::<AccentColor>()?,
            None => defaults.accent,
        };

        let thresholds = ThresholdConfig::new(
            file.warning_threshold.unwrap_or(WARNING_THRESHOLD),
            file.critical_threshold.unwrap_or(CRITICAL_THRESHOLD),
        )?;

        let store_path = match overrides.store_path.or(file.store_path) {
            Some(path) => path,
            None => default_store_path().ok_or(ConfigError::NoDataDir)?,
        };

        Ok(Self {
            defaults: Selection { mode, accent },
            thresholds,
            store_path,
            log_file: overrides.log_file.or(file.log_file),
        })
    }

    /// Resolves settings from an explicit file, or the default file when it
    /// exists.
    pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => SettingsFile::load(path, true)?,
            None => match default_settings_path() {
                Some(path) => SettingsFile::load(&path, false)?,
                None => SettingsFile::default(),
            },
        };
        Self::merge(file, overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_store(overrides: Overrides) -> Overrides {
        Overrides {
            store_path: overrides
                .store_path
                .or_else(|| Some(PathBuf::from("/tmp/prefs.json"))),
            ..overrides
        }
    }

    #[test]
    fn test_builtin_defaults() {
        let settings = Settings::merge(SettingsFile::default(), with_store(Overrides::default()))
            .unwrap();
        assert_eq!(settings.defaults, Selection::default());
        assert_eq!(settings.defaults.mode, ThemeMode::Light);
        assert_eq!(settings.defaults.accent, AccentColor::Sapphire);
        assert_eq!(settings.thresholds, ThresholdConfig::default());
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn test_file_values_are_applied() {
        let file = SettingsFile::from_toml_str(
            r#"
            theme = "dark"
            accent = "mauve"
            warning_threshold = 70
            critical_threshold = 95.5
            store_path = "/var/lib/pulse/prefs.json"
            "#,
        )
        .unwrap();
        let settings = Settings::merge(file, Overrides::default()).unwrap();

        assert_eq!(settings.defaults.mode, ThemeMode::Dark);
        assert_eq!(settings.defaults.accent, AccentColor::Mauve);
        assert_eq!(settings.thresholds.warning(), 70.0);
        assert_eq!(settings.thresholds.critical(), 95.5);
        assert_eq!(
            settings.store_path,
            PathBuf::from("/var/lib/pulse/prefs.json")
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = SettingsFile {
            theme: Some("dark".into()),
            accent: Some("mauve".into()),
            ..SettingsFile::default()
        };
        let overrides = with_store(Overrides {
            accent: Some("peach".into()),
            ..Overrides::default()
        });
        let settings = Settings::merge(file, overrides).unwrap();

        assert_eq!(settings.defaults.mode, ThemeMode::Dark);
        assert_eq!(settings.defaults.accent, AccentColor::Peach);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_name = Overrides {
            theme: Some("sepia".into()),
            ..with_store(Overrides::default())
        };
        assert!(matches!(
            Settings::merge(SettingsFile::default(), bad_name),
            Err(ConfigError::UnknownName(_))
        ));

        let inverted = SettingsFile {
            warning_threshold: Some(95.0),
            critical_threshold: Some(90.0),
            ..SettingsFile::default()
        };
        assert!(matches!(
            Settings::merge(inverted, with_store(Overrides::default())),
            Err(ConfigError::Threshold(_))
        ));

        assert!(SettingsFile::from_toml_str("colour = \"red\"").is_err());
    }

    #[test]
    fn test_explicit_settings_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(matches!(
            Settings::resolve(Some(&missing), with_store(Overrides::default())),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            SettingsFile::load(&missing, false).unwrap(),
            SettingsFile::default()
        );
    }

    #[test]
    fn test_resolve_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "accent = \"teal\"\nlog_file = \"pulse.log\"\n").unwrap();

        let settings = Settings::resolve(Some(&path), with_store(Overrides::default())).unwrap();
        assert_eq!(settings.defaults.accent, AccentColor::Teal);
        assert_eq!(settings.log_file, Some(PathBuf::from("pulse.log")));
    }
}
