//! Structured logging via `tracing`.
//!
//! Configurable level, format (text/json), and destination (stdout, stderr,
//! or file). Environment variables override the config file:
//! `CHARTINDEX_LOG` (filter), `CHARTINDEX_LOG_FORMAT`, `CHARTINDEX_LOG_OUTPUT`,
//! `CHARTINDEX_LOG_FILE`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text.
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file.
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is file; None means the platform state dir.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
        }
    }
}

/// Default log file path under the platform state (or data) directory.
pub fn default_log_file_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "chartindex", "chartindex").ok_or_else(|| {
        ConfigError::Invalid("could not determine platform directory for log file".to_string())
    })?;
    let dir = dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dirs.data_local_dir().to_path_buf());
    Ok(dir.join("chartindex.log"))
}

/// Initialize the logging system.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ConfigError> {
    if config.map(|c| !c.enabled).unwrap_or(false) {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let base = Registry::default().with(filter);

    if format == "json" {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match output {
            Output::Stdout => base.with(layer.with_writer(std::io::stdout)).init(),
            Output::Stderr => base.with(layer.with_writer(std::io::stderr)).init(),
            Output::File => base.with(layer.with_writer(open_log_file(config)?)).init(),
        }
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match output {
            Output::Stdout => base.with(layer.with_writer(std::io::stdout)).init(),
            Output::Stderr => base.with(layer.with_writer(std::io::stderr)).init(),
            Output::File => base
                .with(layer.with_ansi(false).with_writer(open_log_file(config)?))
                .init(),
        }
    }

    Ok(())
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, ConfigError> {
    let path = match std::env::var("CHARTINDEX_LOG_FILE") {
        Ok(p) if !p.is_empty() => PathBuf::from(p),
        _ => match config.and_then(|c| c.file.clone()) {
            Some(p) => p,
            None => default_log_file_path()?,
        },
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConfigError::Invalid(format!("failed to create log directory: {}", e)))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ConfigError::Invalid(format!("failed to open log file {:?}: {}", path, e)))
}

fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("CHARTINDEX_LOG") {
        return Ok(filter);
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    Ok(EnvFilter::new(level))
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ConfigError> {
    if let Ok(format) = std::env::var("CHARTINDEX_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ConfigError::Invalid(format!(
            "invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<Output, ConfigError> {
    let output = match std::env::var("CHARTINDEX_LOG_OUTPUT") {
        Ok(o) if !o.is_empty() => o,
        _ => config
            .map(|c| c.output.clone())
            .unwrap_or_else(default_output),
    };
    match output.as_str() {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(ConfigError::Invalid(format!(
            "invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
