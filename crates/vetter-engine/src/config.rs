//! Engine configuration.
//!
//! Config files are TOML with an `[engine]` table:
//!
//! ```toml
//! [engine]
//! schedule = "interleaved"
//! redact_values = true
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How rule chains of different fields are driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// One rule at a time, in spec order.
    #[default]
    Sequential,
    /// Field chains advance concurrently on the calling task. Rules within a
    /// field still run one after another.
    Interleaved,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Sequential => f.write_str("sequential"),
            Schedule::Interleaved => f.write_str("interleaved"),
        }
    }
}

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub schedule: Schedule,
    /// Leave field values out of trace lines.
    pub redact_values: bool,
}

impl EngineConfig {
    /// Sequential config, the default.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Interleaved config.
    pub fn interleaved() -> Self {
        Self {
            schedule: Schedule::Interleaved,
            ..Self::default()
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_redact_values(mut self, redact: bool) -> Self {
        self.redact_values = redact;
        self
    }

    /// Parse the `[engine]` table of a TOML document. A missing table gives the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source).map_err(ConfigError::Parse)?;
        Ok(file.engine)
    }

    /// Load the `[engine]` table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    engine: EngineConfig,
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[source] toml::de::Error),
}
