//! Domain layer for Event Explorer.
//!
//! Core types independent of storage and rendering concerns.
//!
//! - [`error`]: Error types, soft read issues, and result aliases
//! - [`event`]: Event model and display formatting

pub mod error;
pub mod event;

pub use error::{EventExplorerError, ReadIssue, Result};
pub use event::Event;
