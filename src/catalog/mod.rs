//! Read-only event catalog.
//!
//! The catalog is supplied once at process start and never mutated. It keeps the
//! events in their original order, which is the order every list (search results,
//! favorites) is rendered in.

mod fixture;

use crate::domain::error::{EventExplorerError, Result};
use crate::domain::Event;
use std::collections::HashMap;
use std::path::Path;

/// An ordered, immutable collection of events with O(1) lookup by id.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
    by_id: HashMap<String, usize>,
}

impl EventCatalog {
    /// Builds a catalog from events in display order.
    ///
    /// # Errors
    ///
    /// Returns [`EventExplorerError::Catalog`] if two events share an id.
    pub fn from_events(events: Vec<Event>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(events.len());
        for (position, event) in events.iter().enumerate() {
            if by_id.insert(event.id.clone(), position).is_some() {
                return Err(EventExplorerError::Catalog(format!(
                    "duplicate event id: {}",
                    event.id
                )));
            }
        }

        tracing::debug!(count = events.len(), "event catalog built");
        Ok(Self { events, by_id })
    }

    /// Loads a catalog from a JSON array of events.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a JSON array of events,
    /// or contains duplicate ids.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let _span = tracing::debug_span!("catalog_from_json_file", path = ?path).entered();

        let contents = std::fs::read_to_string(path)?;
        let events: Vec<Event> = serde_json::from_str(&contents).map_err(|e| {
            EventExplorerError::Catalog(format!("failed to parse {}: {e}", path.display()))
        })?;
        Self::from_events(events)
    }

    /// The bundled eight-event catalog (ids `"1"` through `"8"`).
    #[must_use]
    pub fn sample() -> Self {
        let events = fixture::sample_events();
        let by_id = events
            .iter()
            .enumerate()
            .map(|(position, event)| (event.id.clone(), position))
            .collect();
        Self { events, by_id }
    }

    /// All events in catalog order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Event> {
        self.by_id.get(id).map(|&position| &self.events[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Joins favorite ids against the catalog, in catalog order.
    ///
    /// Ids with no matching event are skipped; they stay persisted untouched.
    #[must_use]
    pub fn favorites_of<'a, F>(&'a self, is_favorite: F) -> Vec<&'a Event>
    where
        F: Fn(&str) -> bool,
    {
        self.events.iter().filter(|event| is_favorite(&event.id)).collect()
    }

    /// Favorite ids that have no event in this catalog, sorted.
    #[must_use]
    pub fn dangling_ids<'a>(&self, favorites: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let mut dangling: Vec<&str> = favorites
            .into_iter()
            .filter(|id| !self.by_id.contains_key(*id))
            .collect();
        dangling.sort_unstable();
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoriteSet;

    #[test]
    fn sample_has_eight_events_in_id_order() {
        let catalog = EventCatalog::sample();
        let ids: Vec<&str> = catalog.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(catalog.get("2").map(|e| e.title.as_str()), Some("Jazz Night at the Blue Note"));
        assert!(catalog.get("9").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut events = EventCatalog::sample().events().to_vec();
        events.push(events[0].clone());
        let err = EventCatalog::from_events(events).unwrap_err();
        assert!(matches!(err, EventExplorerError::Catalog(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn favorites_join_skips_dangling_ids() {
        let catalog = EventCatalog::sample();
        let favorites: FavoriteSet = ["5", "2", "404"].iter().map(ToString::to_string).collect();

        let joined: Vec<&str> = catalog
            .favorites_of(|id| favorites.contains(id))
            .iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(joined, ["2", "5"]);
        assert_eq!(catalog.dangling_ids(favorites.iter().map(String::as_str)), ["404"]);
    }

    #[test]
    fn loads_from_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        let json = serde_json::to_string(EventCatalog::sample().events()).expect("serialize");
        std::fs::write(&path, json).expect("write catalog");

        let catalog = EventCatalog::from_json_file(&path).expect("load catalog");
        assert_eq!(catalog.len(), 8);
    }
}
