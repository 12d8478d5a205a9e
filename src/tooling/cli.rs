//! Command-line interface over the catalog service.
//!
//! Every index operation is reachable from here: scan/list reads, the three
//! mutations, and the note passthroughs. Output is JSON (default) or text.

use crate::catalog::CatalogService;
use crate::config::{ChartConfig, ConfigLoader};
use crate::error::ApiError;
use crate::timeframe::TimeframeCode;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

/// Chartindex CLI - index engine for backtest chart screenshots
#[derive(Parser)]
#[command(name = "chartindex")]
#[command(about = "Index engine for backtest chart screenshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured assets
    Assets,
    /// Scan an asset and print its date entries
    Scan {
        /// Asset name
        asset: String,
        /// Output format (text or json)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Print image counts per asset and timeframe
    Stats,
    /// Upload one or more images for a date (all share one sequence)
    Upload {
        /// Asset name
        asset: String,
        /// Target date (YYYY-MM-DD)
        date: String,
        /// Files as TIMEFRAME=PATH pairs, e.g. 5m=chart.png
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Delete a date entry and its note record
    Delete {
        /// Asset name
        asset: String,
        /// Date key (YYYY-MM-DD-N)
        date_key: String,
    },
    /// Rename a date entry to a new date
    Rename {
        /// Asset name
        asset: String,
        /// Date key (YYYY-MM-DD-N)
        date_key: String,
        /// New date (YYYY-MM-DD)
        new_date: String,
    },
    /// Manage note records
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Show the note for a date entry
    Show { asset: String, date_key: String },
    /// Set the note (and optional title) for a date entry
    Set {
        asset: String,
        date_key: String,
        note: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove the note for a date entry
    Remove { asset: String, date_key: String },
}

/// CLI context owning the catalog service.
pub struct CliContext {
    service: CatalogService,
}

impl CliContext {
    /// Load configuration and build the initial index.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(config)
    }

    /// Build a context from an already-loaded configuration.
    pub fn with_config(config: ChartConfig) -> Result<Self, ApiError> {
        let service = CatalogService::open(config)?;
        Ok(Self { service })
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }

    /// Execute a command, returning its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Assets => {
                let assets = self.service.list_assets();
                Ok(serde_json::to_string_pretty(&json!({ "assets": assets }))
                    .unwrap_or_default())
            }
            Commands::Scan { asset, format } => {
                let index = self.service.asset_index(asset)?;
                if format == "text" {
                    let mut out = String::new();
                    for entry in &index {
                        let codes: Vec<&str> = entry
                            .images
                            .iter()
                            .map(|(code, _)| code.as_str())
                            .collect();
                        out.push_str(&format!("{}  [{}]\n", entry.date_key, codes.join(", ")));
                    }
                    out.push_str(&format!("{} date entries\n", index.len()));
                    Ok(out)
                } else {
                    Ok(serde_json::to_string_pretty(&json!({
                        "asset": asset,
                        "entries": index,
                    }))
                    .unwrap_or_default())
                }
            }
            Commands::Stats => {
                let stats = self.service.stats();
                Ok(serde_json::to_string_pretty(&stats).unwrap_or_default())
            }
            Commands::Upload { asset, date, files } => {
                let batch = read_upload_batch(files)?;
                let outcome = self.service.upload(asset, date, &batch)?;
                Ok(serde_json::to_string_pretty(&json!({
                    "sequence": outcome.sequence,
                    "written": outcome.written,
                }))
                .unwrap_or_default())
            }
            Commands::Delete { asset, date_key } => {
                let outcome = self.service.delete_date_entry(asset, date_key)?;
                Ok(serde_json::to_string_pretty(&json!({
                    "date_key": outcome.date_key,
                    "deleted": outcome.deleted,
                }))
                .unwrap_or_default())
            }
            Commands::Rename {
                asset,
                date_key,
                new_date,
            } => {
                let outcome = self.service.rename_date_entry(asset, date_key, new_date)?;
                Ok(serde_json::to_string_pretty(&json!({
                    "old_date_key": outcome.old_date_key,
                    "new_date_key": outcome.new_date_key,
                    "renamed": outcome
                        .renamed
                        .iter()
                        .map(|(from, to)| json!({ "from": from, "to": to }))
                        .collect::<Vec<_>>(),
                }))
                .unwrap_or_default())
            }
            Commands::Note { command } => self.execute_note(command),
        }
    }

    fn execute_note(&self, command: &NoteCommands) -> Result<String, ApiError> {
        match command {
            NoteCommands::Show { asset, date_key } => {
                let note = self.service.note(asset, date_key)?;
                Ok(serde_json::to_string_pretty(&json!({ "note": note })).unwrap_or_default())
            }
            NoteCommands::Set {
                asset,
                date_key,
                note,
                title,
            } => {
                let record =
                    self.service
                        .save_note(asset, date_key, title.clone(), note.clone())?;
                Ok(serde_json::to_string_pretty(&json!({ "note": record })).unwrap_or_default())
            }
            NoteCommands::Remove { asset, date_key } => {
                let removed = self.service.delete_note(asset, date_key)?;
                Ok(serde_json::to_string_pretty(&json!({ "removed": removed }))
                    .unwrap_or_default())
            }
        }
    }
}

/// Parse `TIMEFRAME=PATH` arguments and read the file contents.
fn read_upload_batch(files: &[String]) -> Result<Vec<(TimeframeCode, Vec<u8>)>, ApiError> {
    let mut batch = Vec::with_capacity(files.len());
    for spec in files {
        let (token, path) = spec.split_once('=').ok_or_else(|| {
            ApiError::InvalidArgument(format!(
                "invalid upload spec '{}' (expected TIMEFRAME=PATH)",
                spec
            ))
        })?;
        let timeframe = TimeframeCode::normalize(token).ok_or_else(|| {
            ApiError::InvalidArgument(format!("unknown timeframe token '{}'", token))
        })?;
        let bytes = std::fs::read(path).map_err(|source| ApiError::UploadIo {
            written: 0,
            source,
        })?;
        batch.push((timeframe, bytes));
    }
    Ok(batch)
}
