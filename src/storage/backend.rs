//! Durable key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait, the only durable-storage boundary
//! the crate consumes. Values are opaque serialized strings; the favorites layer stores
//! its whole id collection under a single key and never relies on partial updates.
//!
//! # Design Philosophy
//!
//! The trait is deliberately as small as the boundary it models: `get` and `set`.
//! Ordering of read-modify-write cycles is the caller's job (see
//! [`crate::favorites::FavoritesStore`]), not the backend's.

use crate::domain::error::Result;
use async_trait::async_trait;

/// Asynchronous string key-value storage.
///
/// # Implementations
///
/// - [`crate::storage::FileKeyValueStore`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryKeyValueStore`]: process-local map
///
/// # Examples
///
/// ```no_run
/// use event_explorer::storage::{FileKeyValueStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// # async fn demo() -> event_explorer::Result<()> {
/// let store = FileKeyValueStore::open(PathBuf::from("/tmp/event-explorer.json")).await?;
/// store.set("@favorites", "[\"2\"]").await?;
/// assert_eq!(store.get("@favorites").await?.as_deref(), Some("[\"2\"]"));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// A failed `set` must leave the previous value readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be made durable.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
