//! Catalog: the process-wide index snapshot and the operations around it.
//!
//! The index is fully derived from the filesystem. Readers load an `Arc`
//! snapshot and never block on mutations; mutations are serialized per asset,
//! perform their filesystem side effects, rescan the touched asset, and swap
//! in a new snapshot wholesale. Readers therefore see either the pre- or
//! post-mutation index, never a partially populated one.

use crate::config::ChartConfig;
use crate::error::{ApiError, ScanError};
use crate::index::mutations::{self, DeleteOutcome, RenameOutcome, UploadOutcome};
use crate::index::{scanner, AssetIndex, Index};
use crate::notes::{NoteRecord, NoteStore, SledNoteStore};
use crate::stats::CatalogStats;
use crate::timeframe::TimeframeCode;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Atomically swappable index snapshot.
pub struct IndexHandle {
    inner: RwLock<Arc<Index>>,
}

impl IndexHandle {
    pub fn new(index: Index) -> Self {
        Self {
            inner: RwLock::new(Arc::new(index)),
        }
    }

    /// Current snapshot; cheap Arc clone, never blocks on mutations.
    pub fn load(&self) -> Arc<Index> {
        self.inner.read().clone()
    }

    /// Replace the snapshot wholesale.
    pub fn swap(&self, index: Index) {
        *self.inner.write() = Arc::new(index);
    }
}

/// Per-asset mutation locks.
///
/// Two mutations against the same asset must not race on sequence allocation
/// or rebuilds; different assets proceed concurrently. Reads never take these
/// locks.
pub struct AssetLockManager {
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl AssetLockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_lock(&self, asset: &str) -> Arc<Mutex<()>> {
        {
            let map = self.locks.read();
            if let Some(lock) = map.get(asset) {
                return lock.clone();
            }
        }
        let mut map = self.locks.write();
        map.entry(asset.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for AssetLockManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The API surface consumed by the routing layer.
pub struct CatalogService {
    config: ChartConfig,
    handle: IndexHandle,
    locks: AssetLockManager,
    notes: Arc<dyn NoteStore>,
}

impl CatalogService {
    /// Build the initial index and open the default note store.
    pub fn open(config: ChartConfig) -> Result<Self, ApiError> {
        let notes_path = match &config.notes_db {
            Some(path) => path.clone(),
            None => default_notes_path()?,
        };
        let notes = Arc::new(SledNoteStore::open(&notes_path)?);
        Self::with_note_store(config, notes)
    }

    /// Build the initial index against a caller-provided note store.
    pub fn with_note_store(
        config: ChartConfig,
        notes: Arc<dyn NoteStore>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        let index = scanner::build_index(&config.base_path, &config.assets, &config.timeframes)?;
        Ok(Self {
            handle: IndexHandle::new(index),
            locks: AssetLockManager::new(),
            config,
            notes,
        })
    }

    /// Configured asset names, in configuration order.
    pub fn list_assets(&self) -> Vec<String> {
        self.config.assets.clone()
    }

    /// Current snapshot of the whole index.
    pub fn snapshot(&self) -> Arc<Index> {
        self.handle.load()
    }

    /// Ordered date entries for one asset.
    pub fn asset_index(&self, asset: &str) -> Result<AssetIndex, ApiError> {
        self.ensure_asset(asset)?;
        Ok(self
            .snapshot()
            .get(asset)
            .cloned()
            .unwrap_or_default())
    }

    /// Counts over the current snapshot.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_index(&self.snapshot())
    }

    /// Write an upload batch for `asset` on `date`, then rescan and swap.
    pub fn upload(
        &self,
        asset: &str,
        date: &str,
        batch: &[(TimeframeCode, Vec<u8>)],
    ) -> Result<UploadOutcome, ApiError> {
        self.ensure_asset(asset)?;
        let lock = self.locks.get_lock(asset);
        let _guard = lock.lock();

        let outcome = mutations::upload(&self.asset_dir(asset), date, batch)?;
        self.rescan_asset(asset);
        Ok(outcome)
    }

    /// Delete every file of a date entry, drop its note record (best-effort),
    /// then rescan and swap.
    pub fn delete_date_entry(&self, asset: &str, date_key: &str) -> Result<DeleteOutcome, ApiError> {
        self.ensure_asset(asset)?;
        let lock = self.locks.get_lock(asset);
        let _guard = lock.lock();

        let outcome = mutations::delete_by_key(&self.asset_dir(asset), asset, date_key)?;

        // Note removal is best-effort; the files are already gone and a
        // failure here must not fail the delete.
        let note_key = note_key(asset, date_key);
        if let Err(e) = self.notes.delete(&note_key) {
            warn!(%note_key, error = %e, "failed to delete note record");
        }

        self.rescan_asset(asset);
        Ok(outcome)
    }

    /// Rewrite a date entry's files to a new date, then rescan and swap.
    ///
    /// The note record stays under the old key; the outcome carries both keys
    /// so the caller can migrate it explicitly.
    pub fn rename_date_entry(
        &self,
        asset: &str,
        date_key: &str,
        new_date: &str,
    ) -> Result<RenameOutcome, ApiError> {
        self.ensure_asset(asset)?;
        let lock = self.locks.get_lock(asset);
        let _guard = lock.lock();

        let outcome = mutations::rename_by_key(&self.asset_dir(asset), asset, date_key, new_date)?;
        self.rescan_asset(asset);
        Ok(outcome)
    }

    /// Fetch the note record for a date entry.
    pub fn note(&self, asset: &str, date_key: &str) -> Result<Option<NoteRecord>, ApiError> {
        self.ensure_asset(asset)?;
        Ok(self.notes.get(&note_key(asset, date_key))?)
    }

    /// Create or update the note record for a date entry.
    pub fn save_note(
        &self,
        asset: &str,
        date_key: &str,
        title: Option<String>,
        note: String,
    ) -> Result<NoteRecord, ApiError> {
        self.ensure_asset(asset)?;
        Ok(self.notes.upsert(&note_key(asset, date_key), title, note)?)
    }

    /// Delete the note record for a date entry; returns whether one existed.
    pub fn delete_note(&self, asset: &str, date_key: &str) -> Result<bool, ApiError> {
        self.ensure_asset(asset)?;
        Ok(self.notes.delete(&note_key(asset, date_key))?)
    }

    fn ensure_asset(&self, asset: &str) -> Result<(), ApiError> {
        if self.config.assets.iter().any(|a| a == asset) {
            Ok(())
        } else {
            Err(ApiError::UnknownAsset(asset.to_string()))
        }
    }

    fn asset_dir(&self, asset: &str) -> PathBuf {
        self.config.base_path.join(asset)
    }

    /// Rebuild the touched asset's entries and swap a full new snapshot.
    ///
    /// Other assets' entries carry over from the previous snapshot. A missing
    /// or unreadable directory degrades to empty, mirroring the full build.
    fn rescan_asset(&self, asset: &str) {
        let entries = match scanner::build_asset_index(
            &self.asset_dir(asset),
            asset,
            &self.config.timeframes,
        ) {
            Ok(entries) => entries,
            Err(ScanError::DirectoryNotFound { .. }) => Vec::new(),
            Err(ScanError::Path { path, source }) => {
                warn!(asset, path = %path.display(), %source, "rescan failed, asset now empty");
                Vec::new()
            }
        };

        let mut next = (*self.snapshot()).clone();
        next.insert(asset.to_string(), entries);
        self.handle.swap(next);
    }
}

fn note_key(asset: &str, date_key: &str) -> String {
    format!("{}-{}", asset, date_key)
}

fn default_notes_path() -> Result<PathBuf, ApiError> {
    let dirs = directories::ProjectDirs::from("", "chartindex", "chartindex").ok_or_else(|| {
        crate::error::ConfigError::Invalid(
            "could not determine platform data directory for note store".to_string(),
        )
    })?;
    Ok(dirs.data_dir().join("notes"))
}
