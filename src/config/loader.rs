//! Configuration loading: optional TOML file with CHARTINDEX_* env overlay.

use super::ChartConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default config file name searched in the working directory.
const DEFAULT_FILE: &str = "chartindex.toml";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration.
    ///
    /// Precedence: `chartindex.toml` in the working directory (lowest, and
    /// optional) -> environment (`CHARTINDEX_` prefix, `__` separator).
    pub fn load() -> Result<ChartConfig, ConfigError> {
        let builder = Config::builder()
            .add_source(
                File::with_name(DEFAULT_FILE)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("CHARTINDEX")
                    .separator("__")
                    .try_parsing(true),
            );
        let config: ChartConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ChartConfig, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix("CHARTINDEX")
                    .separator("__")
                    .try_parsing(true),
            );
        let config: ChartConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
