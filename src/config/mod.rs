//! Runtime configuration: base directory, asset list, enabled timeframes.

pub mod loader;

pub use loader::ConfigLoader;

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::timeframe::TimeframeCode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_timeframes() -> Vec<TimeframeCode> {
    TimeframeCode::ALL.to_vec()
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Base directory holding one subdirectory per asset.
    #[serde(default)]
    pub base_path: PathBuf,

    /// Ordered list of asset names to index.
    #[serde(default)]
    pub assets: Vec<String>,

    /// Enabled timeframe codes; files outside this set are skipped.
    #[serde(default = "default_timeframes")]
    pub timeframes: Vec<TimeframeCode>,

    /// Note database path; None means the platform data directory.
    #[serde(default)]
    pub notes_db: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::new(),
            assets: Vec::new(),
            timeframes: default_timeframes(),
            notes_db: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Validate startup invariants. Failures here are fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("base_path is not set".to_string()));
        }
        if self.assets.is_empty() {
            return Err(ConfigError::Invalid(
                "assets must be a non-empty list".to_string(),
            ));
        }
        if self.timeframes.is_empty() {
            return Err(ConfigError::Invalid(
                "timeframes must be a non-empty list".to_string(),
            ));
        }
        Ok(())
    }
}
