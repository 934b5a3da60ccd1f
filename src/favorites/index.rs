//! In-memory favorites membership cache.
//!
//! A [`FavoritesIndex`] is a materialized copy of the store's set for O(1)
//! membership queries while rendering. It is never the source of truth: every reload
//! replaces it wholesale with what the store holds.

use crate::domain::error::Result;
use crate::favorites::FavoritesStore;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct FavoritesIndex {
    ids: HashSet<String>,
    loaded: bool,
}

impl FavoritesIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-reads the store and replaces the cached set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EventExplorerError::StorageRead`] if the read degraded. The
    /// cached set is then left exactly as it was rather than cleared.
    pub async fn reload(&mut self, store: &FavoritesStore) -> Result<()> {
        let favorites = store.get_all().await.into_result()?;
        self.ids = favorites.into_iter().collect();
        self.loaded = true;

        tracing::trace!(count = self.ids.len(), "favorites index reloaded");
        Ok(())
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Cached ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Whether at least one reload has succeeded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
