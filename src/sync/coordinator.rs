//! Cross-screen favorites synchronization.
//!
//! Every screen that shows favorite status owns a [`FavoritesIndex`]. The
//! [`ViewSyncCoordinator`] keeps those indexes honest: a screen that becomes visible
//! re-reads the store, and a completed mutation re-reads it for every mounted screen,
//! not just the one that made the change. Changes are also published on a broadcast
//! channel so rendering layers can react without polling.
//!
//! # State
//!
//! Each screen is either [`Freshness::Stale`] or [`Freshness::Fresh`]. A screen turns
//! fresh only after a successful reload. A failed reload keeps the screen's previous
//! membership, leaves it stale, and hands the error back to the caller.

use crate::domain::error::{EventExplorerError, Result};
use crate::favorites::{FavoritesIndex, FavoritesStore};
use futures_util::future::join_all;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{Mutex, RwLock};

/// Capacity of the change channel; slower subscribers skip ahead.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Identifies a mounted consumer of favorite state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(Cow<'static, str>);

impl ScreenId {
    /// The browsable, searchable event list.
    pub const EVENT_LIST: Self = Self(Cow::Borrowed("event-list"));
    /// A single event's details.
    pub const EVENT_DETAILS: Self = Self(Cow::Borrowed("event-details"));
    /// The list of favorite events.
    pub const FAVORITES: Self = Self(Cow::Borrowed("favorites"));

    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Stale,
    Fresh,
}

/// Published after a mutation has been persisted and screens reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesChanged {
    pub id: String,
    pub is_favorite: bool,
}

/// Outcome of refreshing every mounted screen.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub refreshed: Vec<ScreenId>,
    pub failed: Vec<(ScreenId, EventExplorerError)>,
}

impl SyncReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Receives [`FavoritesChanged`] notifications.
pub struct FavoritesWatcher {
    receiver: broadcast::Receiver<FavoritesChanged>,
}

impl FavoritesWatcher {
    /// Waits for the next change.
    ///
    /// Returns `None` once the coordinator is gone. If this watcher fell behind, the
    /// missed notifications are skipped; re-reading favorite state is always correct.
    pub async fn changed(&mut self) -> Option<FavoritesChanged> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "favorites watcher lagged, skipping ahead");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[derive(Debug)]
struct ScreenState {
    index: FavoritesIndex,
    freshness: Freshness,
}

impl ScreenState {
    fn new() -> Self {
        Self {
            index: FavoritesIndex::new(),
            freshness: Freshness::Stale,
        }
    }

    async fn refresh(&mut self, store: &FavoritesStore) -> Result<()> {
        match self.index.reload(store).await {
            Ok(()) => {
                self.freshness = Freshness::Fresh;
                Ok(())
            }
            Err(e) => {
                self.freshness = Freshness::Stale;
                Err(e)
            }
        }
    }
}

/// Keeps every mounted screen's favorites index reconciled with the store.
pub struct ViewSyncCoordinator {
    store: FavoritesStore,
    screens: RwLock<HashMap<ScreenId, Arc<Mutex<ScreenState>>>>,
    changes: broadcast::Sender<FavoritesChanged>,
}

impl ViewSyncCoordinator {
    #[must_use]
    pub fn new(store: FavoritesStore) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            store,
            screens: RwLock::new(HashMap::new()),
            changes,
        }
    }

    pub(crate) const fn store(&self) -> &FavoritesStore {
        &self.store
    }

    /// Registers a screen. It stays stale until its first reload.
    ///
    /// Mounting an already-mounted screen keeps its current state.
    pub async fn mount(&self, screen: ScreenId) {
        let mut screens = self.screens.write().await;
        screens
            .entry(screen)
            .or_insert_with(|| Arc::new(Mutex::new(ScreenState::new())));
    }

    /// Forgets a screen. Returns whether it was mounted.
    pub async fn unmount(&self, screen: &ScreenId) -> bool {
        self.screens.write().await.remove(screen).is_some()
    }

    /// Currently mounted screens, sorted by id.
    pub async fn mounted(&self) -> Vec<ScreenId> {
        let mut ids: Vec<ScreenId> = self.screens.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Reloads `screen` from the store, mounting it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::StorageRead`] if the store could not be read; the
    /// screen keeps what it showed before.
    #[tracing::instrument(skip_all, fields(screen = %screen))]
    pub async fn on_became_visible(&self, screen: &ScreenId) -> Result<()> {
        let state = self.screen_state(screen).await;
        let mut state = state.lock().await;
        let result = state.refresh(&self.store).await;

        match &result {
            Ok(()) => tracing::debug!(count = state.index.len(), "screen refreshed"),
            Err(e) => tracing::warn!(error = %e, "screen refresh failed, keeping previous state"),
        }
        result
    }

    /// Reloads every mounted screen after a persisted mutation, then notifies
    /// subscribers.
    #[tracing::instrument(skip(self))]
    pub async fn on_mutation(&self, id: &str, is_favorite: bool) -> SyncReport {
        let screens: Vec<(ScreenId, Arc<Mutex<ScreenState>>)> = self
            .screens
            .read()
            .await
            .iter()
            .map(|(screen, state)| (screen.clone(), Arc::clone(state)))
            .collect();

        let reloads = screens.into_iter().map(|(screen, state)| async move {
            let mut state = state.lock().await;
            state.freshness = Freshness::Stale;
            let result = state.refresh(&self.store).await;
            (screen, result)
        });

        let mut report = SyncReport::default();
        for (screen, result) in join_all(reloads).await {
            match result {
                Ok(()) => report.refreshed.push(screen),
                Err(e) => {
                    tracing::warn!(screen = %screen, error = %e, "screen refresh failed after mutation");
                    report.failed.push((screen, e));
                }
            }
        }
        report.refreshed.sort();

        // No subscribers is fine.
        let _ = self.changes.send(FavoritesChanged {
            id: id.to_string(),
            is_favorite,
        });

        tracing::debug!(
            refreshed = report.refreshed.len(),
            failed = report.failed.len(),
            "mounted screens synchronized"
        );
        report
    }

    /// Favorite membership as `screen` currently shows it. Unmounted screens show none.
    pub async fn is_favorite(&self, screen: &ScreenId, id: &str) -> bool {
        match self.existing(screen).await {
            Some(state) => state.lock().await.index.is_favorite(id),
            None => false,
        }
    }

    pub async fn freshness(&self, screen: &ScreenId) -> Option<Freshness> {
        match self.existing(screen).await {
            Some(state) => Some(state.lock().await.freshness),
            None => None,
        }
    }

    /// A copy of the index `screen` renders from.
    pub async fn snapshot(&self, screen: &ScreenId) -> Option<FavoritesIndex> {
        match self.existing(screen).await {
            Some(state) => Some(state.lock().await.index.clone()),
            None => None,
        }
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> FavoritesWatcher {
        FavoritesWatcher {
            receiver: self.changes.subscribe(),
        }
    }

    async fn existing(&self, screen: &ScreenId) -> Option<Arc<Mutex<ScreenState>>> {
        self.screens.read().await.get(screen).cloned()
    }

    async fn screen_state(&self, screen: &ScreenId) -> Arc<Mutex<ScreenState>> {
        if let Some(state) = self.existing(screen).await {
            return state;
        }
        let mut screens = self.screens.write().await;
        Arc::clone(
            screens
                .entry(screen.clone())
                .or_insert_with(|| Arc::new(Mutex::new(ScreenState::new()))),
        )
    }
}

impl fmt::Debug for ViewSyncCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSyncCoordinator")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
