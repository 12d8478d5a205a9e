//! Error taxonomy for the index engine.
//!
//! Parse-level mismatches (unrecognized filename shape, unknown timeframe
//! token) are routine filtering and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning an asset directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory does not exist. Recovered per-asset as an empty index.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Listing or touching a path failed; the asset is unavailable.
    #[error("path error at {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the note store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("note store error: {0}")]
    Sled(#[from] sled::Error),

    #[error("note serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors, fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Operation-level errors surfaced to the routing layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The asset is not in the configured asset list.
    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    /// Delete/rename target has no matching files on disk.
    #[error("no files found for {asset}/{date_key}")]
    NotFound { asset: String, date_key: String },

    /// The rename target date key is already occupied; nothing was touched.
    #[error("date entry already exists: {date_key}")]
    RenameCollision { date_key: String },

    /// A date argument is not YYYY-MM-DD.
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// A malformed caller-supplied argument (e.g. an upload spec).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An upload write failed; `written` files from the batch are already on
    /// disk and are not rolled back.
    #[error("upload failed after writing {written} file(s): {source}")]
    UploadIo {
        written: usize,
        #[source]
        source: std::io::Error,
    },

    /// A rename failed mid-batch; `renamed` files already carry the new date.
    #[error("rename failed after renaming {renamed} file(s): {source}")]
    RenameIo {
        renamed: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
