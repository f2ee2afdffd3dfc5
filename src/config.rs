//! jobwatch configuration loaded from `jobwatch.toml`.
//!
//! [`MonitorConfig`] holds the classification thresholds and the report
//! destination. Values missing from the file use the defaults; CLI flags
//! take precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::MonitorError;
use crate::monitor::Thresholds;

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "jobwatch.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Durations above this many seconds are WARNING.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_secs: u32,

    /// Durations above this many seconds are ERROR.
    #[serde(default = "default_error_threshold")]
    pub error_threshold_secs: u32,

    /// Where the report file is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

// Five minutes.
fn default_warning_threshold() -> u32 {
    Thresholds::default().warning_secs
}

// Ten minutes.
fn default_error_threshold() -> u32 {
    Thresholds::default().error_secs
}

fn default_output_path() -> PathBuf {
    PathBuf::from("monitoring_report.txt")
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            warning_threshold_secs: default_warning_threshold(),
            error_threshold_secs: default_error_threshold(),
            output_path: default_output_path(),
        }
    }
}

impl MonitorConfig {
    /// Loads `explicit` if given (it must exist), otherwise `jobwatch.toml`
    /// in the current directory when present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let config = toml::from_str::<MonitorConfig>(&contents)
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Applies CLI overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        warning_secs: Option<u32>,
        error_secs: Option<u32>,
        output_path: Option<PathBuf>,
    ) -> Self {
        if let Some(secs) = warning_secs {
            self.warning_threshold_secs = secs;
        }
        if let Some(secs) = error_secs {
            self.error_threshold_secs = secs;
        }
        if let Some(path) = output_path {
            self.output_path = path;
        }
        self
    }

    /// Validated thresholds; the warning bound may not exceed the error bound.
    pub fn thresholds(&self) -> Result<Thresholds, MonitorError> {
        if self.warning_threshold_secs > self.error_threshold_secs {
            return Err(MonitorError::Config(format!(
                "warning threshold ({}s) exceeds error threshold ({}s)",
                self.warning_threshold_secs, self.error_threshold_secs
            )));
        }
        Ok(Thresholds {
            warning_secs: self.warning_threshold_secs,
            error_secs: self.error_threshold_secs,
        })
    }
}
