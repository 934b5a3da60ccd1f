//! Favorites persistence and membership.
//!
//! # Modules
//!
//! - [`record`]: the single persisted record, its codec, and the read/write gate
//! - [`store`]: [`FavoritesStore`], the add/remove/get-all contract
//! - [`index`]: [`FavoritesIndex`], a reloadable in-memory membership cache

pub mod index;
pub mod record;
pub mod store;

pub use index::FavoritesIndex;
pub use record::{FavoriteSet, Loaded, Mutation};
pub use store::FavoritesStore;
