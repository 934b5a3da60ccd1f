//! The favorites store: sole writer of favorite state.
//!
//! [`FavoritesStore`] exposes the add/remove/get-all contract over the single
//! persisted record. Mutations are queued to the writer lane
//! ([`crate::worker::FavoritesWorker`]) at call time and applied strictly in that
//! order; reads go directly to storage and may run concurrently with each other.
//!
//! # Example
//!
//! ```rust
//! use event_explorer::favorites::FavoritesStore;
//! use event_explorer::storage::MemoryKeyValueStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> event_explorer::Result<()> {
//! let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), "@favorites");
//!
//! store.add("2").await?;
//! store.add("5").await?;
//! store.remove("2").await?;
//!
//! assert!(store.contains("5").await);
//! assert!(!store.contains("2").await);
//! # Ok(())
//! # }
//! ```

use crate::domain::error::{EventExplorerError, Result};
use crate::favorites::record::{FavoritesRecord, Loaded, Mutation};
use crate::storage::KeyValueStore;
use crate::worker::{FavoritesCommand, FavoritesWorker};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Handle to the persisted favorites.
///
/// Cheap to clone; all clones share one writer lane. The lane shuts down once the
/// last handle is dropped and already-queued mutations have been applied.
#[derive(Clone)]
pub struct FavoritesStore {
    record: Arc<FavoritesRecord>,
    commands: mpsc::UnboundedSender<FavoritesCommand>,
}

impl FavoritesStore {
    /// Creates a store over `backend`, keeping all ids under `key`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, since the writer lane is spawned
    /// onto the current one.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let record = Arc::new(FavoritesRecord::new(backend, key));
        let commands = FavoritesWorker::spawn(Arc::clone(&record));
        Self { record, commands }
    }

    /// Storage key of the favorites record.
    #[must_use]
    pub fn key(&self) -> &str {
        self.record.key()
    }

    /// Reads every favorite id.
    ///
    /// Never fails: a missing record is an empty set, and an unreadable or malformed
    /// one is an empty set with [`Loaded::issue`] describing the problem.
    pub async fn get_all(&self) -> Loaded {
        self.record.load().await
    }

    /// Marks `id` as a favorite.
    ///
    /// Idempotent; storage is only written when the id was absent. The command is
    /// queued when this method is called, so calls take effect in call order even if
    /// the returned futures are awaited later, or never.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::StorageWrite`] if the write failed (favorite
    /// state is then unchanged) or [`EventExplorerError::StorageRead`] if storage
    /// could not be read at all.
    pub fn add(&self, id: impl Into<String>) -> impl Future<Output = Result<Mutation>> + Send + 'static {
        let (command, receiver) = FavoritesCommand::add(id);
        self.submit(command, receiver)
    }

    /// Unmarks `id`. Idempotent; removing an absent id leaves storage untouched.
    ///
    /// Ordering and errors are as for [`Self::add`].
    pub fn remove(&self, id: impl Into<String>) -> impl Future<Output = Result<Mutation>> + Send + 'static {
        let (command, receiver) = FavoritesCommand::remove(id);
        self.submit(command, receiver)
    }

    /// Flips membership of `id` in one read-modify-write cycle.
    ///
    /// The new state is `Mutation::contains(id)`. Ordering and errors are as for
    /// [`Self::add`].
    pub fn toggle(&self, id: impl Into<String>) -> impl Future<Output = Result<Mutation>> + Send + 'static {
        let (command, receiver) = FavoritesCommand::toggle(id);
        self.submit(command, receiver)
    }

    /// Whether `id` is currently a favorite. A degraded read answers `false`.
    pub async fn contains(&self, id: &str) -> bool {
        self.get_all().await.favorites.contains(id)
    }

    fn submit(
        &self,
        command: FavoritesCommand,
        receiver: oneshot::Receiver<Result<Mutation>>,
    ) -> impl Future<Output = Result<Mutation>> + Send + 'static {
        let queued = self
            .commands
            .send(command)
            .map_err(|e| lane_closed(e.0.operation()));

        async move {
            queued?;
            receiver.await.map_err(|_| lane_closed("reply"))?
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.record.key())
            .finish_non_exhaustive()
    }
}

fn lane_closed(stage: &str) -> EventExplorerError {
    EventExplorerError::Worker(format!("favorites writer unavailable ({stage})"))
}
