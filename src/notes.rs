//! Note store: free-text title/note records attached to date entries.
//!
//! Records are keyed by `"{asset}-{date_key}"`. The index engine never reads
//! note content during a scan; it only deletes the key when a date entry is
//! removed. "Not found" and "storage failure" are distinct outcomes.

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A stored note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub title: Option<String>,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence port for note records.
pub trait NoteStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<NoteRecord>, StorageError>;

    /// Create or update the record at `key`, preserving `created_at` on
    /// update.
    fn upsert(
        &self,
        key: &str,
        title: Option<String>,
        note: String,
    ) -> Result<NoteRecord, StorageError>;

    /// Remove the record at `key`; returns whether a record existed.
    fn delete(&self, key: &str) -> Result<bool, StorageError>;
}

/// Sled-backed note store with JSON-encoded values.
pub struct SledNoteStore {
    db: sled::Db,
}

impl SledNoteStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// In-memory store for tests.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }
}

impl NoteStore for SledNoteStore {
    fn get(&self, key: &str) -> Result<Option<NoteRecord>, StorageError> {
        match self.db.get(key)? {
            Some(bytes) => {
                let record: NoteRecord = serde_json::from_slice(&bytes)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn upsert(
        &self,
        key: &str,
        title: Option<String>,
        note: String,
    ) -> Result<NoteRecord, StorageError> {
        let now = Utc::now();
        let created_at = self
            .get(key)?
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let record = NoteRecord {
            title,
            note,
            created_at,
            updated_at: now,
        };
        let bytes = serde_json::to_vec(&record)?;
        self.db.insert(key, bytes)?;
        debug!(key, "note saved");
        Ok(record)
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let removed = self.db.remove(key)?.is_some();
        debug!(key, removed, "note delete");
        Ok(removed)
    }
}
