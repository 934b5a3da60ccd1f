//! Event search filtering.
//!
//! Filtering is a pure inclusion filter over the catalog: no ranking, no state, and
//! surviving events keep their input order. It is cheap enough to re-run on every
//! keystroke.
//!
//! # Matching Rules
//!
//! - An empty or whitespace-only query keeps every event.
//! - Otherwise an event is kept when its title, category, or location matches.
//! - [`MatchMode::Substring`] (default): case-insensitive substring match.
//! - [`MatchMode::Fuzzy`]: skim-style fuzzy match on the trimmed query.

use crate::domain::Event;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Deserialize;
use std::str::FromStr;

/// How a non-empty query is matched against event fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Substring,
    Fuzzy,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown match mode '{other}' (expected substring or fuzzy)")),
        }
    }
}

/// Filters `events` by `query` using case-insensitive substring matching.
///
/// # Examples
///
/// ```
/// use event_explorer::catalog::EventCatalog;
/// use event_explorer::search::filter;
///
/// let catalog = EventCatalog::sample();
/// let hits = filter(catalog.events(), "JAZZ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "2");
/// assert_eq!(filter(catalog.events(), "   ").len(), 8);
/// ```
#[must_use]
pub fn filter<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    filter_with(events, query, MatchMode::Substring)
}

/// Filters `events` by `query` using the given match mode.
#[must_use]
pub fn filter_with<'a>(events: &'a [Event], query: &str, mode: MatchMode) -> Vec<&'a Event> {
    let _span = tracing::trace_span!("filter_events",
        total = events.len(),
        query_len = query.len(),
        mode = ?mode
    ).entered();

    if query.trim().is_empty() {
        return events.iter().collect();
    }

    let filtered: Vec<&Event> = match mode {
        MatchMode::Substring => {
            let needle = query.to_lowercase();
            events
                .iter()
                .filter(|event| searchable_fields(event).any(|field| field.to_lowercase().contains(&needle)))
                .collect()
        }
        MatchMode::Fuzzy => {
            let matcher = SkimMatcherV2::default().ignore_case();
            let pattern = query.trim();
            events
                .iter()
                .filter(|event| searchable_fields(event).any(|field| matcher.fuzzy_match(field, pattern).is_some()))
                .collect()
        }
    };

    tracing::trace!(filtered = filtered.len(), "search filter applied");
    filtered
}

/// Character ranges of `text` that case-insensitively equal `query`.
///
/// Ranges are `(start, end)` in character indices with exclusive end, non-overlapping,
/// left to right. An empty or whitespace-only query highlights nothing.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let haystack = fold_case(text);
    let needle = fold_case(query);
    let mut ranges = Vec::new();
    let mut start = 0;

    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }

    ranges
}

fn searchable_fields(event: &Event) -> impl Iterator<Item = &str> {
    [event.title.as_str(), event.category.as_str(), event.location.as_str()].into_iter()
}

/// Per-character lowercase, keeping one char per input char so indices line up.
fn fold_case(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EventCatalog;

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let catalog = EventCatalog::sample();
        for query in ["", "   ", "\t\n"] {
            let all = filter(catalog.events(), query);
            assert_eq!(ids(&all), ["1", "2", "3", "4", "5", "6", "7", "8"]);
        }
    }

    #[test]
    fn jazz_matches_only_the_jazz_night() {
        let catalog = EventCatalog::sample();
        assert_eq!(ids(&filter(catalog.events(), "jazz")), ["2"]);
        assert_eq!(ids(&filter(catalog.events(), "JAZZ")), ["2"]);
    }

    #[test]
    fn matches_any_of_title_category_location_and_keeps_order() {
        let catalog = EventCatalog::sample();
        // "convention" hits the location of 1 and 7; "music" only the category of 2.
        assert_eq!(ids(&filter(catalog.events(), "convention")), ["1", "7"]);
        assert_eq!(ids(&filter(catalog.events(), "music")), ["2"]);
        assert_eq!(ids(&filter(catalog.events(), "2024")), ["1", "3", "6"]);
    }

    #[test]
    fn description_is_not_searched() {
        let catalog = EventCatalog::sample();
        // Only appears in descriptions.
        assert!(filter(catalog.events(), "fireworks").is_empty());
    }

    #[test]
    fn fuzzy_mode_is_an_opt_in_inclusion_filter() {
        let catalog = EventCatalog::sample();
        let hits = filter_with(catalog.events(), "jzz nght", MatchMode::Fuzzy);
        assert_eq!(ids(&hits), ["2"]);
        assert!(filter(catalog.events(), "jzz nght").is_empty());
    }

    #[test]
    fn match_mode_parses_case_insensitively() {
        assert_eq!("Fuzzy".parse::<MatchMode>(), Ok(MatchMode::Fuzzy));
        assert_eq!(" substring ".parse::<MatchMode>(), Ok(MatchMode::Substring));
        assert!("regex".parse::<MatchMode>().is_err());
    }

    #[test]
    fn highlights_every_occurrence() {
        assert_eq!(highlight_ranges("Jazz at the Blue Note Jazz Club", "jazz"), [(0, 4), (22, 26)]);
        assert_eq!(highlight_ranges("aaaa", "aa"), [(0, 2), (2, 4)]);
        assert!(highlight_ranges("Jazz", " ").is_empty());
        assert!(highlight_ranges("Jazz", "rock").is_empty());
    }
}
