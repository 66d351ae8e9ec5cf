// RUNTIME PREFERENCES (User Experience)

use super::compile_time::recorder::{DEFAULT_RECORDED_ERRORS, MAX_RECORDED_ERRORS};
use crate::logging::Severity;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod env_vars {
    pub const STRUCTURED_LOGGING: &str = "GRAPH_IMPORT_STRUCTURED_LOGGING";
    pub const CONSOLE_LOGGING: &str = "GRAPH_IMPORT_CONSOLE_LOGGING";
    pub const MIN_SEVERITY: &str = "GRAPH_IMPORT_MIN_SEVERITY";
    pub const MAX_RECORDED_ERRORS: &str = "GRAPH_IMPORT_MAX_RECORDED_ERRORS";
    pub const ECHO_TO_LOGGER: &str = "GRAPH_IMPORT_ECHO_TO_LOGGER";
    pub const CAPTURE_PANICS: &str = "GRAPH_IMPORT_CAPTURE_PANICS";
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether log events reach the console at all
    pub enable_console_logging: bool,

    /// Least severe level that is still emitted
    pub min_severity: Severity,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::STRUCTURED_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::CONSOLE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_severity: env::var(env_vars::MIN_SEVERITY)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Severity::Warning),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderPreferences {
    /// Entries the in-memory recorder keeps before flagging overflow
    pub max_errors: usize,

    /// Also forward every recorded error to the context logger
    pub echo_to_logger: bool,
}

impl Default for RecorderPreferences {
    fn default() -> Self {
        Self {
            max_errors: env::var(env_vars::MAX_RECORDED_ERRORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RECORDED_ERRORS),
            echo_to_logger: env::var(env_vars::ECHO_TO_LOGGER)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryPreferences {
    /// Absorb panics raised inside a unit as uncategorized failures
    pub capture_panics: bool,
}

impl Default for BoundaryPreferences {
    fn default() -> Self {
        Self {
            capture_panics: env::var(env_vars::CAPTURE_PANICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Complete importer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub logging: LoggingPreferences,
    pub recorder: RecorderPreferences,
    pub boundary: BoundaryPreferences,
}

impl ImporterConfig {
    /// Parse from TOML text; missing sections fall back to defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recorder.max_errors == 0 {
            return Err(ConfigError::Invalid(
                "recorder.max_errors must be at least 1".to_string(),
            ));
        }
        if self.recorder.max_errors > MAX_RECORDED_ERRORS {
            return Err(ConfigError::Invalid(format!(
                "recorder.max_errors {} exceeds limit {}",
                self.recorder.max_errors, MAX_RECORDED_ERRORS
            )));
        }
        Ok(())
    }
}
