//! Sequence allocation for new uploads, scoped per (asset, date).

use crate::error::ScanError;
use crate::filename;
use crate::index::scanner::list_file_names;
use std::path::Path;

/// Next free sequence number for `date` within `dir`.
///
/// Only files whose parsed date equals `date` count; sequence numbering is
/// per (asset, date), not global. A missing directory means no files yet, so
/// the first sequence is 1 (upload creates the directory).
pub fn next_sequence(dir: &Path, date: &str) -> Result<u32, ScanError> {
    let names = match list_file_names(dir) {
        Ok(names) => names,
        Err(ScanError::DirectoryNotFound { .. }) => return Ok(1),
        Err(e) => return Err(e),
    };

    let max = names
        .iter()
        .filter_map(|name| filename::parse(name))
        .filter(|parsed| parsed.date == date)
        .map(|parsed| parsed.sequence)
        .max();

    Ok(max.map_or(1, |m| m.saturating_add(1)))
}
