//! Append-only generation log: a single JSON array, newest first, capped.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::errors::StoreError;
use crate::models::history::normalize_title;
use crate::models::HistoryEntry;
use crate::storage::write_json_atomic;

/// Entries kept after each append.
pub const HISTORY_LIMIT: usize = 20;

pub struct HistoryStore {
    path: PathBuf,
    /// Serialises read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, newest first. Never fails: unreadable history is empty history.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn get(&self, index: usize) -> Result<HistoryEntry, StoreError> {
        let entries = self.list().await;
        let len = entries.len();
        entries
            .into_iter()
            .nth(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })
    }

    /// Inserts at the front and evicts beyond [`HISTORY_LIMIT`].
    pub async fn append(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.persist(&entries).await?;
        info!("History now holds {} entries", entries.len());
        Ok(())
    }

    /// Edits the two user-editable fields. A blank title becomes "Untitled".
    pub async fn update_metadata(
        &self,
        index: usize,
        job_title: &str,
        company: &str,
    ) -> Result<HistoryEntry, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        let len = entries.len();
        let entry = entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        entry.job_title = normalize_title(job_title);
        entry.company = company.trim().to_string();
        let updated = entry.clone();
        self.persist(&entries).await?;
        Ok(updated)
    }

    pub async fn delete(&self, index: usize) -> Result<HistoryEntry, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        if index >= entries.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        let removed = entries.remove(index);
        self.persist(&entries).await?;
        Ok(removed)
    }

    async fn load(&self) -> Vec<HistoryEntry> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                error!("Failed to read history {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        let items = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!("History file is not a JSON array; treating as empty");
                return Vec::new();
            }
            Err(e) => {
                error!("History file is corrupt ({e}); treating as empty");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| match serde_json::from_value::<HistoryEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping malformed history entry: {e}");
                    None
                }
            })
            .collect()
    }

    /// On failure the file is reset to `[]` so the next load starts clean.
    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        if let Err(e) = write_json_atomic(&self.path, entries).await {
            error!("Failed to write history {}: {e}", self.path.display());
            if let Err(reset) = write_json_atomic(&self.path, &Vec::<Value>::new()).await {
                error!("Failed to reset history file: {reset}");
            }
            return Err(e);
        }
        Ok(())
    }
}
