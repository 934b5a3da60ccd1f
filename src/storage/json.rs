//! JSON file-based key-value backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - the whole file is loaded into memory once on open
//! - **Write**: O(n) - serializes and writes the entire dataset
//! - **Best for**: a handful of small keys, infrequent writes

use crate::domain::error::{EventExplorerError, Result};
use crate::storage::backend::KeyValueStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Current version of the on-disk container format.
const FORMAT_VERSION: u32 = 1;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored values by key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value backend.
///
/// The dataset is cached in memory. A `set` serializes the would-be dataset, writes
/// it atomically, and only then commits it to the cache, so a failed write leaves
/// both the file and subsequent reads on the previous value.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "@favorites": "[\"2\",\"5\"]"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct FileKeyValueStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on open.
    data: Mutex<StorageData>,
}

impl FileKeyValueStore {
    /// Creates or opens a JSON storage file.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the file is
    /// created on the first `set`. Parent directories are created automatically.
    ///
    /// A file that can't be read, isn't valid JSON, or has a newer format version is
    /// logged and treated as empty, and the first `set` rewrites it. Unparseable
    /// files are first moved aside to `<name>.corrupt`.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    pub async fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON key-value store");

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = match Self::load_from_file(&file_path).await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!("initializing new empty storage");
                StorageData::default()
            }
            Err(e) => {
                tracing::warn!(path = ?file_path, error = %e, "unusable storage file, starting empty");
                if matches!(e, EventExplorerError::Storage(_)) {
                    Self::set_aside(&file_path).await;
                }
                StorageData::default()
            }
        };

        tracing::debug!(entries = data.entries.len(), "key-value store ready");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// `Ok(None)` when there is no file yet.
    async fn load_from_file(path: &Path) -> Result<Option<StorageData>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| EventExplorerError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(EventExplorerError::Storage(format!(
                "unsupported storage version {} (newest known is {FORMAT_VERSION})",
                data.version
            )));
        }

        tracing::debug!(version = data.version, entries = data.entries.len(), "loaded storage data");
        Ok(Some(data))
    }

    /// Keeps an unusable file around for inspection.
    async fn set_aside(path: &Path) {
        let mut aside = path.as_os_str().to_owned();
        aside.push(".corrupt");

        match tokio::fs::rename(path, &aside).await {
            Ok(()) => tracing::info!(path = ?aside, "moved unusable storage file aside"),
            Err(e) => tracing::debug!(error = %e, "could not move unusable storage file aside"),
        }
    }

    /// Writes `data` to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path, so the
    /// file is never left half-written.
    async fn save_to_file(&self, data: &StorageData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| EventExplorerError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json).await?;

        tracing::trace!("renaming temporary file to final location");
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.file_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.lock().await;
        let value = data.entries.get(key).cloned();
        tracing::trace!(key, found = value.is_some(), "key lookup complete");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.lock().await;

        let mut next = data.clone();
        next.version = FORMAT_VERSION;
        next.entries.insert(key.to_string(), value.to_string());

        self.save_to_file(&next).await?;
        *data = next;

        tracing::debug!(key, bytes = value.len(), "value persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("store.json");

        let store = FileKeyValueStore::open(path.clone()).await.expect("open");
        assert_eq!(store.get("@favorites").await.expect("get"), None);
        store.set("@favorites", r#"["5"]"#).await.expect("set");
        drop(store);

        let reopened = FileKeyValueStore::open(path).await.expect("reopen");
        assert_eq!(
            reopened.get("@favorites").await.expect("get").as_deref(),
            Some(r#"["5"]"#)
        );
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty_and_is_rewritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").expect("write");

        let store = FileKeyValueStore::open(path.clone()).await.expect("open");
        assert_eq!(store.get("@favorites").await.expect("get"), None);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("store.json.corrupt")).expect("set aside"),
            "{ not json"
        );

        store.set("@favorites", r#"["1"]"#).await.expect("set");
        let reopened = FileKeyValueStore::open(path).await.expect("reopen");
        assert_eq!(
            reopened.get("@favorites").await.expect("get").as_deref(),
            Some(r#"["1"]"#)
        );
    }

    #[tokio::test]
    async fn newer_format_version_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"version": 99, "entries": {"k": "v"}}"#).expect("write");

        let store = FileKeyValueStore::open(path).await.expect("open");
        assert_eq!(store.get("k").await.expect("get"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_rename_removes_the_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let store = FileKeyValueStore::open(path.clone()).await.expect("open");

        // A non-empty directory on the target path makes the rename fail.
        std::fs::create_dir_all(path.join("occupied")).expect("block target");

        assert!(store.set("k", "v").await.is_err());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(store.get("k").await.expect("get"), None);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let store = FileKeyValueStore::open(path.clone()).await.expect("open");
        store.set("k", "old").await.expect("set");

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(path.with_extension("tmp")).expect("block temp path");

        assert!(store.set("k", "new").await.is_err());
        assert_eq!(store.get("k").await.expect("get").as_deref(), Some("old"));
    }
}
