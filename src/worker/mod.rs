//! Background writer lane for favorites mutations.
//!
//! All mutating favorites calls are queued to a single Tokio task so that their
//! read-modify-write cycles never overlap, while reads go straight to storage.
//!
//! # Architecture
//!
//! - `messages`: command protocol with reply channels and span propagation
//! - `handler`: worker implementation and command processing logic

pub mod handler;
pub mod messages;

pub use handler::FavoritesWorker;
pub use messages::FavoritesCommand;
