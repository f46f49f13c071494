// LogScan - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), Library (macOS) compliance.
//
// Example config.toml:
//
//   [markers]
//   start = "TEST STARTED"
//   end = "TEST FINISHED"
//
//   [logging]
//   level = "info"

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogScan configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logscan/ or %APPDATA%\LogScan\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of the default config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so newer config files keep working with older
/// binaries.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[markers]` section.
    pub markers: MarkersSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[markers]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MarkersSection {
    /// Substring marking the start of a timed run.
    pub start: Option<String>,
    /// Substring marking the end of a timed run.
    pub end: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Start marker used by `-s`.
    pub start_marker: String,
    /// End marker used by `-s`.
    pub end_marker: String,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_marker: constants::DEFAULT_START_MARKER.to_string(),
            end_marker: constants::DEFAULT_END_MARKER.to_string(),
            log_level: None,
        }
    }
}

/// Load the config file at `path`, tolerating problems.
///
/// A missing file yields defaults with no warnings. An unreadable or
/// unparseable file yields defaults plus a warning. Invalid individual
/// values fall back to their defaults with a warning each.
pub fn load_config(path: &Path) -> (AppConfig, Vec<String>) {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }
    match read_raw(path) {
        Ok(raw) => validate(raw),
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load a config file the user named explicitly.
///
/// Unlike [`load_config`], a missing or unparseable file is an error.
pub fn load_config_strict(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw = read_raw(path)?;
    Ok(validate(raw))
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(raw)
}

/// Validate each field, accumulating warnings for rejected values.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    if let Some(start) = raw.markers.start {
        match non_empty_marker("markers.start", start) {
            Ok(m) => config.start_marker = m,
            Err(e) => warnings.push(format!(
                "{e}. Using default (\"{}\").",
                constants::DEFAULT_START_MARKER
            )),
        }
    }

    if let Some(end) = raw.markers.end {
        match non_empty_marker("markers.end", end) {
            Ok(m) => config.end_marker = m,
            Err(e) => warnings.push(format!(
                "{e}. Using default (\"{}\").",
                constants::DEFAULT_END_MARKER
            )),
        }
    }

    if let Some(level) = raw.logging.level {
        let lower = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
            config.log_level = Some(lower);
        } else {
            let e = ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            };
            warnings.push(format!(
                "{e}. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

fn non_empty_marker(field: &str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
            expected: "a non-empty substring".to_string(),
        })
    } else {
        Ok(value)
    }
}
