//! End-to-end favorites and search behavior through the public API.

use async_trait::async_trait;
use event_explorer::favorites::{FavoriteSet, FavoritesIndex, Mutation};
use event_explorer::search::filter;
use event_explorer::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use event_explorer::sync::{Freshness, ScreenId};
use event_explorer::{EventCatalog, EventExplorer, EventExplorerError, FavoritesStore, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const KEY: &str = "@favorites";

fn ids(set: &FavoriteSet) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn add_add_remove_keeps_a_mounted_screen_in_step() {
    let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), KEY);
    let explorer = EventExplorer::new(EventCatalog::sample(), store);
    explorer.on_became_visible(&ScreenId::EVENT_LIST).await.expect("mount");

    explorer.add_favorite("2").await.expect("add 2");
    explorer.add_favorite("5").await.expect("add 5");
    assert_eq!(ids(&explorer.favorites().await.favorites), ["2", "5"]);
    assert!(explorer.is_favorite(&ScreenId::EVENT_LIST, "2").await);

    explorer.remove_favorite("2").await.expect("remove 2");
    assert_eq!(ids(&explorer.favorites().await.favorites), ["5"]);
    assert!(explorer.is_favorite(&ScreenId::EVENT_LIST, "5").await);
    assert!(!explorer.is_favorite(&ScreenId::EVENT_LIST, "2").await);
}

#[tokio::test]
async fn add_then_contains_and_remove_then_not() {
    let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), KEY);

    store.add("4").await.expect("add");
    assert!(store.contains("4").await);

    store.remove("4").await.expect("remove");
    assert!(!store.contains("4").await);
}

#[tokio::test]
async fn interleaved_mutations_never_duplicate_ids() {
    let dir = tempfile::tempdir().expect("temp dir");
    let backend = FileKeyValueStore::open(dir.path().join("favorites.json"))
        .await
        .expect("open");
    let store = FavoritesStore::new(Arc::new(backend), KEY);

    let mut pending: Vec<Pin<Box<dyn Future<Output = Result<Mutation>> + Send>>> = Vec::new();
    for (i, id) in ["1", "2", "1", "3", "2", "1", "3"].into_iter().enumerate() {
        if i % 3 == 2 {
            pending.push(Box::pin(store.remove(id)));
        } else {
            pending.push(Box::pin(store.add(id)));
        }
    }
    for outcome in futures_util::future::join_all(pending).await {
        outcome.expect("mutation");
    }

    let raw = backend_value(dir.path()).await;
    let stored: Vec<String> = serde_json::from_str(&raw).expect("array");
    let mut deduped = stored.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(stored.len(), deduped.len());
    assert_eq!(stored, ["2", "3"]);
}

async fn backend_value(dir: &std::path::Path) -> String {
    let reopened = FileKeyValueStore::open(dir.join("favorites.json"))
        .await
        .expect("reopen");
    reopened.get(KEY).await.expect("get").expect("record present")
}

#[tokio::test]
async fn a_corrupt_favorites_file_reads_empty_and_is_repaired() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, "{ truncated").expect("write");

    let backend = FileKeyValueStore::open(path.clone()).await.expect("open");
    let store = FavoritesStore::new(Arc::new(backend), KEY);
    let loaded = store.get_all().await;
    assert!(loaded.favorites.is_empty());
    assert_eq!(loaded.issue, None);

    store.add("4").await.expect("add repairs");

    let reopened = FileKeyValueStore::open(path).await.expect("reopen");
    let store = FavoritesStore::new(Arc::new(reopened), KEY);
    assert_eq!(ids(&store.get_all().await.favorites), ["4"]);
}

#[tokio::test]
async fn favorites_survive_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("favorites.json");

    {
        let backend = FileKeyValueStore::open(path.clone()).await.expect("open");
        let store = FavoritesStore::new(Arc::new(backend), KEY);
        store.add("8").await.expect("add");
    }

    let backend = FileKeyValueStore::open(path).await.expect("reopen");
    let store = FavoritesStore::new(Arc::new(backend), KEY);
    assert_eq!(ids(&store.get_all().await.favorites), ["8"]);
}

#[test]
fn jazz_query_and_empty_query_against_the_sample_catalog() {
    let catalog = EventCatalog::sample();

    let jazz: Vec<&str> = filter(catalog.events(), "jazz").iter().map(|e| e.id.as_str()).collect();
    assert_eq!(jazz, ["2"]);

    let all: Vec<&str> = filter(catalog.events(), "").iter().map(|e| e.id.as_str()).collect();
    assert_eq!(all, ["1", "2", "3", "4", "5", "6", "7", "8"]);
}

#[tokio::test]
async fn becoming_visible_rejects_a_cache_filled_before_an_add() {
    let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), KEY);
    let explorer = EventExplorer::new(EventCatalog::sample(), store.clone());

    explorer.on_became_visible(&ScreenId::FAVORITES).await.expect("first visit");
    assert!(explorer.favorite_events(&ScreenId::FAVORITES).await.is_empty());

    // Added behind the screen's back, e.g. from another screen.
    store.add("3").await.expect("add");
    assert!(!explorer.is_favorite(&ScreenId::FAVORITES, "3").await);

    explorer.on_became_visible(&ScreenId::FAVORITES).await.expect("second visit");
    assert!(explorer.is_favorite(&ScreenId::FAVORITES, "3").await);
    assert_eq!(
        explorer.coordinator().freshness(&ScreenId::FAVORITES).await,
        Some(Freshness::Fresh)
    );
}

#[tokio::test]
async fn a_standalone_index_reload_sees_the_latest_write() {
    let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), KEY);
    let mut index = FavoritesIndex::new();
    index.reload(&store).await.expect("reload");

    store.add("1").await.expect("add");
    assert!(!index.is_favorite("1"));

    index.reload(&store).await.expect("reload");
    assert!(index.is_favorite("1"));
}

/// Memory store whose writes can be switched off.
#[derive(Default)]
struct ReadOnlySwitch {
    inner: MemoryKeyValueStore,
    read_only: AtomicBool,
}

#[async_trait]
impl KeyValueStore for ReadOnlySwitch {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(EventExplorerError::Storage("read-only".into()));
        }
        self.inner.set(key, value).await
    }
}

#[tokio::test]
async fn a_failed_toggle_changes_nothing_anywhere() {
    let backend = Arc::new(ReadOnlySwitch::default());
    let store = FavoritesStore::new(backend.clone(), KEY);
    let explorer = EventExplorer::new(EventCatalog::sample(), store.clone());
    explorer.on_became_visible(&ScreenId::EVENT_DETAILS).await.expect("visible");
    let mut watcher = explorer.on_favorites_changed();

    backend.read_only.store(true, Ordering::SeqCst);
    let err = explorer.toggle_favorite("7").await.unwrap_err();

    assert!(err.is_write_failure());
    assert!(!explorer.is_favorite(&ScreenId::EVENT_DETAILS, "7").await);
    assert!(!store.contains("7").await);
    let quiet = tokio::time::timeout(Duration::from_millis(50), watcher.changed()).await;
    assert!(quiet.is_err(), "no notification after a failed write");
}

#[tokio::test]
async fn subscribers_hear_about_successful_toggles() {
    let store = FavoritesStore::new(Arc::new(MemoryKeyValueStore::new()), KEY);
    let explorer = EventExplorer::new(EventCatalog::sample(), store);
    let mut watcher = explorer.on_favorites_changed();

    explorer.toggle_favorite("1").await.expect("toggle");

    let change = watcher.changed().await.expect("notification");
    assert_eq!(change.id, "1");
    assert!(change.is_favorite);
}
