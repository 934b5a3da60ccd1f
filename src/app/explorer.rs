//! The application facade consumed by rendering layers.
//!
//! [`EventExplorer`] ties the read-only catalog, the favorites store and the view
//! sync coordinator together behind the small surface a UI needs: filtered events,
//! per-screen favorite status, toggling, and a change subscription.
//!
//! # Example
//!
//! ```rust
//! use event_explorer::app::EventExplorer;
//! use event_explorer::catalog::EventCatalog;
//! use event_explorer::favorites::FavoritesStore;
//! use event_explorer::storage::MemoryKeyValueStore;
//! use event_explorer::sync::ScreenId;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> event_explorer::Result<()> {
//! let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), "@favorites");
//! let explorer = EventExplorer::new(EventCatalog::sample(), store);
//!
//! explorer.on_became_visible(&ScreenId::EVENT_LIST).await?;
//! assert!(explorer.toggle_favorite("2").await?);
//! assert!(explorer.is_favorite(&ScreenId::EVENT_LIST, "2").await);
//! # Ok(())
//! # }
//! ```

use crate::catalog::EventCatalog;
use crate::domain::error::{EventExplorerError, Result};
use crate::domain::Event;
use crate::favorites::{FavoritesStore, Loaded};
use crate::search::{filter_with, MatchMode};
use crate::sync::{FavoritesWatcher, ScreenId, SyncReport, ViewSyncCoordinator};

/// Outcome of a successful toggle.
#[derive(Debug)]
pub struct Toggled {
    /// Membership after the toggle.
    pub is_favorite: bool,
    /// Which mounted screens were reloaded afterwards.
    pub sync: SyncReport,
}

/// Catalog, favorites, and screen synchronization behind one handle.
#[derive(Debug)]
pub struct EventExplorer {
    catalog: EventCatalog,
    sync: ViewSyncCoordinator,
    match_mode: MatchMode,
}

impl EventExplorer {
    #[must_use]
    pub fn new(catalog: EventCatalog, store: FavoritesStore) -> Self {
        Self {
            catalog,
            sync: ViewSyncCoordinator::new(store),
            match_mode: MatchMode::default(),
        }
    }

    /// Switches search matching, e.g. to [`MatchMode::Fuzzy`].
    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Mutations must go through the explorer so mounted screens are resynchronized.
    pub(crate) const fn store(&self) -> &FavoritesStore {
        self.sync.store()
    }

    #[must_use]
    pub const fn coordinator(&self) -> &ViewSyncCoordinator {
        &self.sync
    }

    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Catalog events matching `query`, in catalog order.
    #[must_use]
    pub fn filtered_events(&self, query: &str) -> Vec<&Event> {
        filter_with(self.catalog.events(), query, self.match_mode)
    }

    /// Looks up one event.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::EventNotFound`] for an id the catalog lacks.
    pub fn event(&self, id: &str) -> Result<&Event> {
        self.catalog
            .get(id)
            .ok_or_else(|| EventExplorerError::EventNotFound(id.to_string()))
    }

    /// Favorite status of `id` as `screen` currently shows it.
    pub async fn is_favorite(&self, screen: &ScreenId, id: &str) -> bool {
        self.sync.is_favorite(screen, id).await
    }

    /// Persisted favorites, independent of any screen.
    pub async fn favorites(&self) -> Loaded {
        self.store().get_all().await
    }

    /// Marks a catalog event as a favorite and resynchronizes every mounted screen.
    ///
    /// # Errors
    ///
    /// As for [`Self::toggle_favorite`].
    #[tracing::instrument(skip(self))]
    pub async fn add_favorite(&self, id: &str) -> Result<SyncReport> {
        self.event(id)?;
        let mutation = self.store().add(id).await?;
        tracing::info!(changed = mutation.changed, "favorite added");
        Ok(self.sync.on_mutation(id, true).await)
    }

    /// Unmarks an id and resynchronizes every mounted screen.
    ///
    /// Ids missing from the catalog are accepted so leftover favorites can be cleared.
    ///
    /// # Errors
    ///
    /// [`EventExplorerError::StorageWrite`] or [`EventExplorerError::StorageRead`], as
    /// for [`Self::toggle_favorite`].
    #[tracing::instrument(skip(self))]
    pub async fn remove_favorite(&self, id: &str) -> Result<SyncReport> {
        let mutation = self.store().remove(id).await?;
        tracing::info!(changed = mutation.changed, "favorite removed");
        Ok(self.sync.on_mutation(id, false).await)
    }

    /// Flips the favorite state of a catalog event and resynchronizes every mounted
    /// screen. Returns the new state.
    ///
    /// The current state is decided by the store, not by any screen's cache, so a
    /// stale screen can't turn an "add" into a "remove".
    ///
    /// # Errors
    ///
    /// - [`EventExplorerError::EventNotFound`] if `id` is not in the catalog
    /// - [`EventExplorerError::StorageWrite`] if persisting failed; no screen is
    ///   touched and favorite state is unchanged
    /// - [`EventExplorerError::StorageRead`] if storage could not be read
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        Ok(self.toggle(id).await?.is_favorite)
    }

    /// Like [`Self::toggle_favorite`], also reporting which screens were refreshed.
    ///
    /// # Errors
    ///
    /// As for [`Self::toggle_favorite`].
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, id: &str) -> Result<Toggled> {
        self.event(id)?;

        let mutation = self.store().toggle(id).await?;
        let is_favorite = mutation.contains(id);
        tracing::info!(is_favorite, "favorite toggled");

        let sync = self.sync.on_mutation(id, is_favorite).await;
        Ok(Toggled { is_favorite, sync })
    }

    /// Favorite events as `screen` currently shows them, in catalog order.
    ///
    /// Ids with no catalog entry are skipped.
    pub async fn favorite_events(&self, screen: &ScreenId) -> Vec<&Event> {
        match self.sync.snapshot(screen).await {
            Some(index) => self.catalog.favorites_of(|id| index.is_favorite(id)),
            None => Vec::new(),
        }
    }

    /// Must be called whenever `screen` gains focus, before it renders favorite
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::StorageRead`] if storage could not be read; the
    /// screen keeps what it showed before.
    pub async fn on_became_visible(&self, screen: &ScreenId) -> Result<()> {
        self.sync.on_became_visible(screen).await
    }

    /// Subscribes to favorite changes made through this explorer.
    #[must_use]
    pub fn on_favorites_changed(&self) -> FavoritesWatcher {
        self.sync.subscribe()
    }
}
