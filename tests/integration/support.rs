//! Shared fixture helpers for integration tests.

use chartindex::catalog::CatalogService;
use chartindex::config::ChartConfig;
use chartindex::notes::SledNoteStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Create an empty file inside `dir`.
pub fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"png").unwrap();
}

/// Build a config pointing at `base` with the given assets, all timeframes
/// enabled.
pub fn config(base: &Path, assets: &[&str]) -> ChartConfig {
    ChartConfig {
        base_path: base.to_path_buf(),
        assets: assets.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Build a catalog service over a fresh temp tree with one directory per
/// asset and an in-memory note store.
pub fn service(tmp: &TempDir, assets: &[&str]) -> CatalogService {
    for asset in assets {
        fs::create_dir_all(tmp.path().join(asset)).unwrap();
    }
    let notes = Arc::new(SledNoteStore::temporary().unwrap());
    CatalogService::with_note_store(config(tmp.path(), assets), notes).unwrap()
}
