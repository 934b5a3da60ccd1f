//! Application layer coordinating catalog, favorites and screens.
//!
//! This layer sits between the binary (main.rs) and the domain, storage, worker
//! and sync layers.
//!
//! ```text
//! Command → screens::* → EventExplorer → FavoritesStore / ViewSyncCoordinator
//!                ↓
//!           view models → ui::renderer
//! ```
//!
//! # Modules
//!
//! - [`explorer`]: The [`EventExplorer`] facade
//! - [`screens`]: Per-screen view model composition

pub mod explorer;
pub mod screens;

pub use explorer::{EventExplorer, Toggled};
