//! Error types for Event Explorer.
//!
//! This module defines the centralized error type [`EventExplorerError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Favorites errors come in two tiers. Read failures are soft: they are described by a
//! [`ReadIssue`] that travels next to an empty result and only becomes an error when a
//! caller chooses to surface it. Write failures are hard: they are returned as
//! [`EventExplorerError::StorageWrite`] so the user can be told and retry.

use thiserror::Error;

/// The main error type for Event Explorer operations.
///
/// # Examples
///
/// ```
/// use event_explorer::EventExplorerError;
///
/// fn persist() -> Result<(), EventExplorerError> {
///     Err(EventExplorerError::StorageWrite("disk full".to_string()))
/// }
///
/// assert!(persist().unwrap_err().is_write_failure());
/// ```
#[derive(Debug, Error)]
pub enum EventExplorerError {
    /// A key-value backend operation failed.
    ///
    /// Raised by [`crate::storage::KeyValueStore`] implementations. The favorites layer
    /// reclassifies it as [`Self::StorageRead`] or [`Self::StorageWrite`].
    #[error("Storage error: {0}")]
    Storage(String),

    /// The persisted favorites record could not be read or parsed.
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Writing the favorites record failed; favorite state is unchanged.
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The event catalog could not be loaded or is inconsistent.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// No event with the given id exists in the catalog.
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// The favorites writer lane is gone.
    ///
    /// Only happens when the worker task has been torn down, e.g. because the runtime
    /// is shutting down.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl EventExplorerError {
    /// Returns `true` for failures of a favorites mutation's write phase.
    #[must_use]
    pub const fn is_write_failure(&self) -> bool {
        matches!(self, Self::StorageWrite(_))
    }
}

/// Why a read of the favorites record degraded to the empty set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadIssue {
    /// The backend could not be reached.
    #[error("favorites record unavailable: {0}")]
    Unavailable(String),

    /// The record exists but is not a JSON array of strings.
    #[error("favorites record malformed: {0}")]
    Malformed(String),
}

impl From<ReadIssue> for EventExplorerError {
    fn from(issue: ReadIssue) -> Self {
        Self::StorageRead(issue.to_string())
    }
}

/// A specialized `Result` type for Event Explorer operations.
pub type Result<T> = std::result::Result<T, EventExplorerError>;
