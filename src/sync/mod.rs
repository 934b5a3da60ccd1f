//! Keeping every favorites consumer current.
//!
//! - [`coordinator`]: [`ViewSyncCoordinator`], per-screen refresh and change notifications

pub mod coordinator;

pub use coordinator::{
    FavoritesChanged, FavoritesWatcher, Freshness, ScreenId, SyncReport, ViewSyncCoordinator,
};
