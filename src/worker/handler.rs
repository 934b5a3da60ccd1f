//! Writer-lane task for favorites mutations.
//!
//! Every add and remove is a read-modify-write of the whole favorites record. Running
//! them all on one task, strictly one after another, guarantees that operation N's
//! write lands before operation N+1's read. Nothing here is cancellable: once a
//! command is queued it is applied even if the caller has stopped waiting.

use crate::domain::error::{ReadIssue, Result};
use crate::favorites::record::FavoritesRecord;
use crate::favorites::{FavoriteSet, Mutation};
use crate::worker::messages::{FavoritesCommand, Reply};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

#[derive(Debug, Clone, Copy)]
enum Change {
    Insert,
    Remove,
    Flip,
}

/// State of the background writer.
pub struct FavoritesWorker {
    record: Arc<FavoritesRecord>,
    commands: mpsc::UnboundedReceiver<FavoritesCommand>,
}

impl FavoritesWorker {
    pub(crate) fn new(
        record: Arc<FavoritesRecord>,
        commands: mpsc::UnboundedReceiver<FavoritesCommand>,
    ) -> Self {
        Self { record, commands }
    }

    /// Spawns the writer onto the current Tokio runtime and returns its queue.
    ///
    /// The task ends once every sender has been dropped and the queue is drained.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub(crate) fn spawn(record: Arc<FavoritesRecord>) -> mpsc::UnboundedSender<FavoritesCommand> {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::new(record, receiver).run());
        sender
    }

    /// Processes commands until the queue closes.
    pub async fn run(mut self) {
        tracing::debug!(key = %self.record.key(), "favorites writer started");

        while let Some(command) = self.commands.recv().await {
            self.handle(command).await;
        }

        tracing::debug!("favorites writer stopped, queue closed");
    }

    async fn handle(&self, command: FavoritesCommand) {
        let operation = command.operation();

        let (id, reply, parent, change) = match command {
            FavoritesCommand::Add { id, reply, span } => (id, reply, span, Change::Insert),
            FavoritesCommand::Remove { id, reply, span } => (id, reply, span, Change::Remove),
            FavoritesCommand::Toggle { id, reply, span } => (id, reply, span, Change::Flip),
        };

        let span = tracing::debug_span!(parent: &parent, "favorites_rmw", operation, id = %id);
        let result = self.apply(&id, change).instrument(span).await;
        Self::respond(operation, reply, result);
    }

    /// One read-modify-write cycle.
    ///
    /// A malformed record is replaced; an unreachable one aborts the mutation so a
    /// transient read failure can't wipe the stored set.
    async fn apply(&self, id: &str, change: Change) -> Result<Mutation> {
        let loaded = self.record.load().await;

        let (mut favorites, repair) = match loaded.issue {
            None => (loaded.favorites, false),
            Some(ReadIssue::Malformed(reason)) => {
                tracing::warn!(reason = %reason, "rewriting malformed favorites record");
                (FavoriteSet::new(), true)
            }
            Some(issue @ ReadIssue::Unavailable(_)) => return Err(issue.into()),
        };

        let changed = match change {
            Change::Insert => favorites.insert(id.to_string()),
            Change::Remove => favorites.remove(id),
            Change::Flip => favorites.remove(id) || favorites.insert(id.to_string()),
        };

        if changed || repair {
            self.record.store(&favorites).await?;
        } else {
            tracing::debug!("membership unchanged, skipping write");
        }

        Ok(Mutation { favorites, changed })
    }

    /// Hands the result back with consistent logging.
    fn respond(operation: &str, reply: Reply, result: Result<Mutation>) {
        match &result {
            Ok(mutation) => tracing::debug!(
                operation,
                changed = mutation.changed,
                count = mutation.favorites.len(),
                "favorites mutation applied"
            ),
            Err(e) => tracing::error!(operation, error = %e, "favorites mutation failed"),
        }

        if reply.send(result).is_err() {
            tracing::debug!(operation, "caller stopped waiting for the result");
        }
    }
}
