//! JSON file persistence for review history.
//!
//! The whole list is stored as one pretty-printed JSON array. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! never leaves a truncated history behind.

use std::path::{Path, PathBuf};

use crate::models::HistoryEntry;

use super::HistoryError;

/// Read entries from `path`. A missing file is an empty history.
pub async fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>, HistoryError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(HistoryError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| HistoryError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically replace the file at `path` with `entries`.
pub async fn write_entries(path: &Path, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
    let io_err = |source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }

    let content = serde_json::to_string_pretty(entries).map_err(HistoryError::Serialize)?;
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, content).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
