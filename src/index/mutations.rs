//! Filesystem side effects: upload, delete-by-key, rename-by-key.
//!
//! These functions only touch the disk; the caller rescans and swaps the
//! index snapshot afterwards. Partial failures are reported with a progress
//! count and never rolled back (a later rescan picks up whatever landed).

use crate::error::{ApiError, ScanError};
use crate::filename::{self, ParsedName, UPLOAD_EXT};
use crate::index::scanner::list_file_names;
use crate::index::sequence::next_sequence;
use crate::timeframe::TimeframeCode;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Result of a successful upload batch.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Sequence shared by every file in the batch.
    pub sequence: u32,
    /// Filenames written, in batch order.
    pub written: Vec<String>,
}

/// Result of a successful delete.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub date_key: String,
    pub deleted: Vec<String>,
}

/// Result of a successful rename.
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub old_date_key: String,
    pub new_date_key: String,
    /// (old filename, new filename) pairs.
    pub renamed: Vec<(String, String)>,
}

/// Write an upload batch into `dir`.
///
/// The batch must contain at least one file; all files share one sequence,
/// allocated once for the batch. Uploads always write `.png`. A failed write
/// surfaces the count already on disk; those files stay.
pub fn upload(
    dir: &Path,
    date: &str,
    batch: &[(TimeframeCode, Vec<u8>)],
) -> Result<UploadOutcome, ApiError> {
    if !filename::is_valid_date(date) {
        return Err(ApiError::InvalidDate(date.to_string()));
    }
    if batch.is_empty() {
        return Err(ApiError::InvalidArgument(
            "upload batch must contain at least one file".to_string(),
        ));
    }

    fs::create_dir_all(dir).map_err(|source| ApiError::UploadIo { written: 0, source })?;
    let sequence = next_sequence(dir, date)?;

    let mut written = Vec::with_capacity(batch.len());
    for (timeframe, bytes) in batch {
        let name = filename::format(date, sequence, *timeframe, UPLOAD_EXT);
        fs::write(dir.join(&name), bytes).map_err(|source| ApiError::UploadIo {
            written: written.len(),
            source,
        })?;
        written.push(name);
    }

    info!(dir = %dir.display(), date, sequence, files = written.len(), "upload batch written");
    Ok(UploadOutcome { sequence, written })
}

/// Files in `dir` whose re-derived date key equals `date_key`.
fn matching_files(dir: &Path, date_key: &str) -> Result<Vec<(String, ParsedName)>, ScanError> {
    let names = list_file_names(dir)?;
    Ok(names
        .into_iter()
        .filter_map(|name| filename::parse(&name).map(|parsed| (name, parsed)))
        .filter(|(_, parsed)| parsed.date_key() == date_key)
        .collect())
}

/// Delete every file belonging to `date_key`.
pub fn delete_by_key(dir: &Path, asset: &str, date_key: &str) -> Result<DeleteOutcome, ApiError> {
    let matches = matching_files(dir, date_key)?;
    if matches.is_empty() {
        return Err(ApiError::NotFound {
            asset: asset.to_string(),
            date_key: date_key.to_string(),
        });
    }

    let mut deleted = Vec::with_capacity(matches.len());
    for (name, _) in matches {
        let path = dir.join(&name);
        fs::remove_file(&path).map_err(|source| ScanError::Path { path, source })?;
        deleted.push(name);
    }

    info!(asset, date_key, files = deleted.len(), "date entry deleted");
    Ok(DeleteOutcome {
        date_key: date_key.to_string(),
        deleted,
    })
}

/// Rewrite the date portion of every file belonging to `date_key`.
///
/// Sequence and timeframe are preserved (the timeframe token is written in
/// canonical form); the extension follows the original file. The collision
/// check runs against re-derived on-disk keys before the first rename, so a
/// collision leaves every file untouched. Mid-batch failure reports how many
/// files already carry the new date.
pub fn rename_by_key(
    dir: &Path,
    asset: &str,
    date_key: &str,
    new_date: &str,
) -> Result<RenameOutcome, ApiError> {
    if !filename::is_valid_date(new_date) {
        return Err(ApiError::InvalidDate(new_date.to_string()));
    }

    let matches = matching_files(dir, date_key)?;
    if matches.is_empty() {
        return Err(ApiError::NotFound {
            asset: asset.to_string(),
            date_key: date_key.to_string(),
        });
    }

    // Every match shares the key's sequence.
    let sequence = matches[0].1.sequence;
    let new_date_key = format!("{}-{}", new_date, sequence);
    if !matching_files(dir, &new_date_key)?.is_empty() {
        warn!(asset, date_key, %new_date_key, "rename collision");
        return Err(ApiError::RenameCollision {
            date_key: new_date_key,
        });
    }

    let mut renamed = Vec::with_capacity(matches.len());
    for (name, parsed) in matches {
        let ext = name.rsplit('.').next().unwrap_or(UPLOAD_EXT);
        let new_name = filename::format(new_date, sequence, parsed.timeframe, ext);
        fs::rename(dir.join(&name), dir.join(&new_name)).map_err(|source| ApiError::RenameIo {
            renamed: renamed.len(),
            source,
        })?;
        renamed.push((name, new_name));
    }

    info!(asset, date_key, %new_date_key, files = renamed.len(), "date entry renamed");
    Ok(RenameOutcome {
        old_date_key: date_key.to_string(),
        new_date_key,
        renamed,
    })
}
