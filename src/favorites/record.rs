//! The persisted favorites record.
//!
//! All favorite ids live in one value under one well-known key, serialized as a JSON
//! array of strings. Order in the array carries no meaning and duplicates are
//! collapsed on decode.
//!
//! [`FavoritesRecord`] owns access to that value. Readers and the writer lane meet at
//! a gate: loads hold it shared, the write phase holds it exclusively, so a load sees
//! either the state before or after a write, never a torn one.

use crate::domain::error::{EventExplorerError, ReadIssue, Result};
use crate::storage::KeyValueStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A set of favorite event ids.
pub type FavoriteSet = BTreeSet<String>;

/// Result of a fail-soft read.
///
/// On any read or parse failure `favorites` is empty and `issue` says why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub favorites: FavoriteSet,
    pub issue: Option<ReadIssue>,
}

impl Loaded {
    /// Turns a degraded read into an error, for callers that must not act on it.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::StorageRead`] if the read degraded.
    pub fn into_result(self) -> Result<FavoriteSet> {
        match self.issue {
            Some(issue) => Err(issue.into()),
            None => Ok(self.favorites),
        }
    }
}

/// Outcome of an add or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The full set after the mutation.
    pub favorites: FavoriteSet,

    /// Whether membership actually changed.
    pub changed: bool,
}

impl Mutation {
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }
}

/// Decodes a persisted record.
///
/// # Errors
///
/// Returns [`ReadIssue::Malformed`] unless `raw` is a JSON array of strings.
pub fn decode(raw: &str) -> std::result::Result<FavoriteSet, ReadIssue> {
    serde_json::from_str::<Vec<String>>(raw)
        .map(|ids| ids.into_iter().collect())
        .map_err(|e| ReadIssue::Malformed(e.to_string()))
}

/// Encodes a set as a JSON array of strings.
///
/// # Errors
///
/// Returns [`EventExplorerError::StorageWrite`] if serialization fails.
pub fn encode(favorites: &FavoriteSet) -> Result<String> {
    serde_json::to_string(favorites)
        .map_err(|e| EventExplorerError::StorageWrite(format!("failed to serialize favorites: {e}")))
}

pub(crate) struct FavoritesRecord {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    gate: RwLock<()>,
}

impl FavoritesRecord {
    pub(crate) fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            gate: RwLock::new(()),
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Reads the record, degrading to the empty set on failure.
    ///
    /// An absent key is the normal first-run state, not an issue.
    pub(crate) async fn load(&self) -> Loaded {
        let _shared = self.gate.read().await;

        match self.backend.get(&self.key).await {
            Ok(None) => {
                tracing::debug!(key = %self.key, "no favorites record yet");
                Loaded::default()
            }
            Ok(Some(raw)) => match decode(&raw) {
                Ok(favorites) => {
                    tracing::debug!(count = favorites.len(), "favorites record loaded");
                    Loaded { favorites, issue: None }
                }
                Err(issue) => {
                    tracing::warn!(key = %self.key, error = %issue, "treating favorites as empty");
                    Loaded { favorites: FavoriteSet::new(), issue: Some(issue) }
                }
            },
            Err(e) => {
                let issue = ReadIssue::Unavailable(e.to_string());
                tracing::warn!(key = %self.key, error = %issue, "treating favorites as empty");
                Loaded { favorites: FavoriteSet::new(), issue: Some(issue) }
            }
        }
    }

    /// Replaces the record with `favorites`.
    pub(crate) async fn store(&self, favorites: &FavoriteSet) -> Result<()> {
        let encoded = encode(favorites)?;
        let _exclusive = self.gate.write().await;

        self.backend
            .set(&self.key, &encoded)
            .await
            .map_err(|e| EventExplorerError::StorageWrite(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn decode_collapses_duplicates() {
        let set = decode(r#"["2","5","2"]"#).expect("valid record");
        assert_eq!(set.len(), 2);
        assert!(set.contains("2") && set.contains("5"));
    }

    #[test]
    fn decode_rejects_non_string_arrays() {
        assert!(matches!(decode(r#"{"ids":["1"]}"#), Err(ReadIssue::Malformed(_))));
        assert!(matches!(decode("[1,2]"), Err(ReadIssue::Malformed(_))));
        assert!(matches!(decode(""), Err(ReadIssue::Malformed(_))));
    }

    #[tokio::test]
    async fn absent_key_loads_empty_without_issue() {
        let record = FavoritesRecord::new(Arc::new(MemoryKeyValueStore::new()), "@favorites");
        assert_eq!(record.load().await, Loaded::default());
    }

    #[tokio::test]
    async fn malformed_value_loads_empty_with_issue() {
        let backend = MemoryKeyValueStore::with_entry("@favorites", "not json");
        let record = FavoritesRecord::new(Arc::new(backend), "@favorites");

        let loaded = record.load().await;
        assert!(loaded.favorites.is_empty());
        assert!(matches!(loaded.issue, Some(ReadIssue::Malformed(_))));
        assert!(loaded.into_result().is_err());
    }

    #[tokio::test]
    async fn store_then_load_uses_a_json_array() {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let record = FavoritesRecord::new(backend.clone(), "@favorites");
        let favorites: FavoriteSet = ["5".to_string(), "2".to_string()].into();

        record.store(&favorites).await.expect("store");

        let raw = backend.get("@favorites").await.expect("get").expect("present");
        assert_eq!(raw, r#"["2","5"]"#);
        assert_eq!(record.load().await.favorites, favorites);
    }
}
