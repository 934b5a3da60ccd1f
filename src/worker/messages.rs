//! Commands for the favorites writer lane.
//!
//! This module defines the request protocol between [`crate::favorites::FavoritesStore`]
//! handles and the single background task that applies mutations. Each command
//! carries a one-shot reply channel and the tracing span it was issued from, so the
//! worker's read-modify-write shows up under the caller's span.

use crate::domain::error::Result;
use crate::favorites::Mutation;
use tokio::sync::oneshot;
use tracing::Span;

/// Channel on which the worker reports a command's outcome.
pub type Reply = oneshot::Sender<Result<Mutation>>;

/// Macro to generate builder methods for `FavoritesCommand` variants.
///
/// Generates constructors that create the reply channel and capture the current
/// span, returning the command together with the receiving half.
macro_rules! command_builders {
    (
        $(
            $builder_name:ident($variant:ident)
        ),* $(,)?
    ) => {
        impl FavoritesCommand {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " command bound to the current span")]
                pub fn $builder_name(id: impl Into<String>) -> (Self, oneshot::Receiver<Result<Mutation>>) {
                    let (reply, receiver) = oneshot::channel();
                    let command = Self::$variant {
                        id: id.into(),
                        reply,
                        span: Span::current(),
                    };
                    (command, receiver)
                }
            )*
        }
    };
}

command_builders! {
    add(Add),
    remove(Remove),
    toggle(Toggle),
}

/// Mutations processed, one at a time and in arrival order, by the writer lane.
#[derive(Debug)]
pub enum FavoritesCommand {
    /// Insert an id if absent.
    Add {
        id: String,
        reply: Reply,
        span: Span,
    },

    /// Remove an id if present.
    Remove {
        id: String,
        reply: Reply,
        span: Span,
    },

    /// Flip membership of an id within a single cycle.
    Toggle {
        id: String,
        reply: Reply,
        span: Span,
    },
}

impl FavoritesCommand {
    /// Name used in logs and spans.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Toggle { .. } => "toggle",
        }
    }
}
