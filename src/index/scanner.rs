//! Directory scanner: parses filenames and groups them into date entries.

use crate::error::ScanError;
use crate::filename;
use crate::index::{AssetIndex, DateEntry, ImageAsset, Index};
use crate::timeframe::TimeframeCode;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// List file names directly inside `dir`, sorted by name.
///
/// Sorting fixes a canonical listing order so the duplicate-slot overwrite
/// policy below does not depend on filesystem enumeration order.
pub(crate) fn list_file_names(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            let source = e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walk error")
            });
            ScanError::Path { path, source }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Scan one asset directory into an ordered [`AssetIndex`].
///
/// Files that do not match the grammar, carry an unknown timeframe token, or
/// carry a code outside `enabled` are skipped silently. When two files map to
/// the same (date key, timeframe) slot the later one in name order wins and
/// the overwrite is logged at warn level.
pub fn build_asset_index(
    dir: &Path,
    asset: &str,
    enabled: &[TimeframeCode],
) -> Result<AssetIndex, ScanError> {
    let names = list_file_names(dir)?;
    info!(asset, total_files = names.len(), "scanning asset directory");

    let mut by_key: BTreeMap<String, DateEntry> = BTreeMap::new();
    for name in names {
        let Some(parsed) = filename::parse(&name) else {
            continue;
        };
        if !enabled.contains(&parsed.timeframe) {
            continue;
        }

        let date_key = parsed.date_key();
        let entry = by_key
            .entry(date_key.clone())
            .or_insert_with(|| DateEntry::new(parsed.date.clone(), parsed.sequence));

        let image = ImageAsset {
            asset: asset.to_string(),
            timeframe: parsed.timeframe,
            filename: name.clone(),
            path: dir.join(&name),
        };
        if let Some(previous) = entry.images.insert(image) {
            warn!(
                asset,
                %date_key,
                timeframe = %parsed.timeframe,
                kept = %name,
                replaced = %previous.filename,
                "duplicate timeframe slot, last file wins"
            );
        } else {
            debug!(asset, %date_key, timeframe = %parsed.timeframe, file = %name, "image grouped");
        }
    }

    let mut entries: Vec<DateEntry> = by_key.into_values().collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.sequence.cmp(&b.sequence)));

    info!(asset, total_dates = entries.len(), "asset scan complete");
    Ok(entries)
}

/// Build the full index for every configured asset.
///
/// A missing asset subdirectory yields an empty index for that asset; a
/// listing failure is logged and likewise degrades to empty, so one bad asset
/// never sinks the whole build. A missing base directory fails the build.
pub fn build_index(
    base: &Path,
    assets: &[String],
    enabled: &[TimeframeCode],
) -> Result<Index, ScanError> {
    if !base.is_dir() {
        return Err(ScanError::DirectoryNotFound {
            path: base.to_path_buf(),
        });
    }
    info!(base = %base.display(), assets = assets.len(), "starting multi-asset scan");

    let mut index = Index::new();
    for asset in assets {
        let dir = base.join(asset);
        let entries = match build_asset_index(&dir, asset, enabled) {
            Ok(entries) => entries,
            Err(ScanError::DirectoryNotFound { path }) => {
                warn!(asset, path = %path.display(), "asset directory not found");
                Vec::new()
            }
            Err(ScanError::Path { path, source }) => {
                error!(asset, path = %path.display(), %source, "asset unavailable");
                Vec::new()
            }
        };
        index.insert(asset.clone(), entries);
    }

    info!(total_assets = index.len(), "multi-asset scan complete");
    Ok(index)
}
