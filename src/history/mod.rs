//! Server-persisted review history.
//!
//! A capped list of saved reviews, newest first. Saving past capacity evicts
//! the oldest entry. Every mutation is written through to disk before it
//! becomes visible, so the in-memory list and the file never disagree.

pub mod file;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::HistoryEntry;

/// Errors from the history store.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to access history file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("history file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(serde_json::Error),
}

/// Capped, optionally file-backed list of saved reviews.
pub struct HistoryStore {
    path: Option<PathBuf>,
    capacity: usize,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Open a store backed by `path`, loading any existing entries.
    ///
    /// A file holding more than `capacity` entries is trimmed on load; the
    /// file itself is rewritten on the next mutation. A capacity below one
    /// is raised to one so a save is always readable afterwards.
    pub async fn open(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, HistoryError> {
        let path = path.into();
        let capacity = capacity.max(1);
        let mut entries = file::read_entries(&path).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(capacity);
        tracing::debug!(path = %path.display(), count = entries.len(), "history loaded");
        Ok(Self {
            path: Some(path),
            capacity,
            entries: Mutex::new(entries),
        })
    }

    /// A store that lives only in memory.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            path: None,
            capacity: capacity.max(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All entries, newest first.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<HistoryEntry> {
        self.entries
            .lock()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Insert `entry` at the front, evicting the oldest past capacity.
    pub async fn save(&self, entry: HistoryEntry) -> Result<HistoryEntry, HistoryError> {
        let mut entries = self.entries.lock().await;
        let mut next = Vec::with_capacity(entries.len() + 1);
        next.push(entry.clone());
        next.extend(entries.iter().cloned());
        if next.len() > self.capacity {
            let evicted = next.len() - self.capacity;
            next.truncate(self.capacity);
            tracing::debug!(evicted, "history capacity reached");
        }
        self.persist(&next).await?;
        *entries = next;
        Ok(entry)
    }

    /// Delete an entry. Returns `false` if no entry had that id.
    pub async fn delete(&self, id: Uuid) -> Result<bool, HistoryError> {
        let mut entries = self.entries.lock().await;
        let Some(pos) = entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let mut next = entries.clone();
        next.remove(pos);
        self.persist(&next).await?;
        *entries = next;
        Ok(true)
    }

    /// Remove every entry, returning how many were removed.
    pub async fn clear(&self) -> Result<usize, HistoryError> {
        let mut entries = self.entries.lock().await;
        let removed = entries.len();
        self.persist(&[]).await?;
        entries.clear();
        Ok(removed)
    }

    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        match &self.path {
            Some(path) => file::write_entries(path, entries).await,
            None => Ok(()),
        }
    }
}
