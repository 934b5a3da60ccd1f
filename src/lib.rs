//! Event Explorer: browse, search and favorite events from the terminal.
//!
//! Event Explorer provides:
//! - A read-only event catalog (bundled sample or a JSON file)
//! - Case-insensitive substring search, with opt-in fuzzy matching
//! - Persistent favorites with serialized, non-cancellable mutations
//! - Cross-screen favorite consistency: every mounted screen is reloaded after a
//!   change and on becoming visible

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - EventExplorer facade                             │
//! │  - Screen view model composition                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Sync (sync/)  │   │ Favorites     │   │ Search        │
//! │ - Screens     │   │ (favorites/)  │   │ (search/)     │
//! │ - Freshness   │   │ - Store       │   │ - Filter      │
//! │ - Broadcast   │   │ - Index       │   │ - Highlights  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                             │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Worker        │   │ Storage       │
//! │ - View models │   │ (worker/)     │   │ (storage/)    │
//! │ - Renderer    │   │ - Writer lane │   │ - JSON file   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Catalog, Domain & Infrastructure                   │
//! │  - Event model and errors (domain/)                 │
//! │  - Event catalog (catalog/)                         │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: The [`EventExplorer`] facade and per-screen view models
//! - [`catalog`]: The read-only [`EventCatalog`]
//! - [`domain`]: Core domain types ([`Event`], errors)
//! - [`favorites`]: [`FavoritesStore`] and the per-screen [`favorites::FavoritesIndex`]
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: File-based `tracing` output
//! - [`search`]: Query filtering
//! - [`storage`]: Key-value persistence backends
//! - [`sync`]: [`sync::ViewSyncCoordinator`], cross-screen consistency
//! - [`ui`]: View models and text rendering
//! - [`worker`]: The single writer lane behind every favorites mutation
//!
//! # Configuration
//!
//! Configuration comes from an optional TOML file plus `key=value` overrides:
//!
//! ```toml
//! data_dir = "~/.local/share/event-explorer"
//! favorites_key = "@favorites"
//! catalog_path = "~/events.json"
//! match_mode = "fuzzy"
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use event_explorer::{initialize, Config};
//! use event_explorer::sync::ScreenId;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> event_explorer::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: dir.path().to_path_buf(),
//!     ..Default::default()
//! };
//!
//! let explorer = initialize(&config).await?;
//! explorer.on_became_visible(&ScreenId::EVENT_LIST).await?;
//!
//! assert_eq!(explorer.filtered_events("jazz")[0].id, "2");
//! assert!(explorer.toggle_favorite("2").await?);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod favorites;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod storage;
pub mod sync;
pub mod ui;
pub mod worker;

pub use app::EventExplorer;
pub use catalog::EventCatalog;
pub use domain::{Event, EventExplorerError, ReadIssue, Result};
pub use favorites::FavoritesStore;
pub use search::MatchMode;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default storage key of the favorites record.
pub const DEFAULT_FAVORITES_KEY: &str = "@favorites";

/// Default tracing level.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Runtime configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `favorites.json` and `event-explorer.log`.
    ///
    /// A leading `~` is expanded. Default: platform data dir + `event-explorer`.
    pub data_dir: PathBuf,

    /// Storage key under which favorite ids are kept. Default: `"@favorites"`
    pub favorites_key: String,

    /// JSON file with the event catalog. Default: the bundled sample.
    pub catalog_path: Option<PathBuf>,

    /// Search matching. Default: substring.
    pub match_mode: MatchMode,

    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::default_data_dir(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            catalog_path: None,
            match_mode: MatchMode::default(),
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::Io`] if the file can't be read or
    /// [`EventExplorerError::Config`] if it isn't valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            EventExplorerError::Config(format!("invalid config file {}: {e}", path.display()))
        })
    }

    /// Parses configuration from string key-value pairs.
    ///
    /// Missing keys, and values that don't parse, fall back to defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use event_explorer::{Config, MatchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("match_mode".to_string(), "fuzzy".to_string());
    /// map.insert("favorites_key".to_string(), "@mine".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.match_mode, MatchMode::Fuzzy);
    /// assert_eq!(config.favorites_key, "@mine");
    /// assert_eq!(config.trace_level, "info");
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies string key-value overrides on top of `self`.
    ///
    /// Unknown keys and unparseable values are logged and ignored.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        for (key, value) in map {
            let value = value.trim();
            match key.as_str() {
                "data_dir" if !value.is_empty() => self.data_dir = PathBuf::from(value),
                "favorites_key" if !value.is_empty() => self.favorites_key = value.to_string(),
                "catalog_path" => {
                    self.catalog_path = (!value.is_empty()).then(|| PathBuf::from(value));
                }
                "match_mode" => match value.parse() {
                    Ok(mode) => self.match_mode = mode,
                    Err(e) => tracing::debug!(error = %e, "ignoring match_mode override"),
                },
                "trace_level" if !value.is_empty() => self.trace_level = value.to_string(),
                _ => tracing::debug!(key = %key, "ignoring config override"),
            }
        }
        self
    }

    /// The data directory with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::expand_tilde(&self.data_dir.to_string_lossy())
    }

    /// Loads the configured catalog, or the bundled sample if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file can't be read or parsed.
    pub fn catalog(&self) -> Result<EventCatalog> {
        match &self.catalog_path {
            Some(path) => EventCatalog::from_json_file(&infrastructure::expand_tilde(
                &path.to_string_lossy(),
            )),
            None => Ok(EventCatalog::sample()),
        }
    }
}

/// Opens persistent storage and builds an [`EventExplorer`].
///
/// Favorites live in `<data_dir>/favorites.json`, created on first write. An
/// unusable favorites file is not an error: favorites start empty and the next
/// change rewrites it. Tracing is not initialized here; call
/// [`observability::init_tracing`] first if wanted.
///
/// # Errors
///
/// Returns an error if the data directory can't be created or the catalog can't be
/// loaded.
pub async fn initialize(config: &Config) -> Result<EventExplorer> {
    let data_dir = config.data_dir();
    tracing::debug!(data_dir = %data_dir.display(), "initializing event explorer");

    let catalog = config.catalog()?;
    let backend = storage::FileKeyValueStore::open(infrastructure::favorites_file(&data_dir)).await?;
    let store = FavoritesStore::new(Arc::new(backend), config.favorites_key.clone());

    tracing::info!(
        events = catalog.len(),
        match_mode = ?config.match_mode,
        "event explorer ready"
    );
    Ok(EventExplorer::new(catalog, store).with_match_mode(config.match_mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "match_mode = \"fuzzy\"\ntrace_level = \"debug\"\n").expect("write");

        let config = Config::from_file(&path).expect("parse");

        assert_eq!(config.match_mode, MatchMode::Fuzzy);
        assert_eq!(config.trace_level, "debug");
        assert_eq!(config.favorites_key, DEFAULT_FAVORITES_KEY);
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn config_file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scan_depth = 4\n").expect("write");

        assert!(matches!(Config::from_file(&path), Err(EventExplorerError::Config(_))));
    }

    #[test]
    fn invalid_overrides_fall_back_to_defaults() {
        let map = BTreeMap::from([
            ("match_mode".to_string(), "regex".to_string()),
            ("favorites_key".to_string(), "  ".to_string()),
            ("bogus".to_string(), "1".to_string()),
        ]);

        assert_eq!(Config::from_map(&map), Config::default());
    }

    #[test]
    fn empty_catalog_override_clears_the_path() {
        let base = Config {
            catalog_path: Some(PathBuf::from("events.json")),
            ..Default::default()
        };
        let map = BTreeMap::from([("catalog_path".to_string(), String::new())]);

        assert_eq!(base.with_overrides(&map).catalog_path, None);
    }

    #[tokio::test]
    async fn initialize_persists_favorites_in_the_data_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let explorer = initialize(&config).await.expect("initialize");
        explorer.toggle_favorite("6").await.expect("toggle");

        let raw = std::fs::read_to_string(dir.path().join("favorites.json")).expect("favorites file");
        assert!(raw.contains("@favorites"));
        assert!(raw.contains("6"));
    }

    #[tokio::test]
    async fn initialize_recovers_from_a_truncated_favorites_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("favorites.json"), "{ truncated").expect("write");
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let explorer = initialize(&config).await.expect("initialize");
        assert!(explorer.favorites().await.favorites.is_empty());

        explorer.add_favorite("3").await.expect("add");

        let reopened = initialize(&config).await.expect("reopen");
        assert!(reopened.favorites().await.favorites.contains("3"));
    }
}
