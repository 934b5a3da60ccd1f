//! View model types representing renderable screen state.
//!
//! View models are immutable, display-ready snapshots computed by the application
//! layer from the catalog and a screen's favorites index. They contain no business
//! logic: dates are already formatted, favorite labels already chosen, and search
//! matches already turned into highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use event_explorer::catalog::EventCatalog;
//! use event_explorer::ui::viewmodel::EventCard;
//!
//! let catalog = EventCatalog::sample();
//! let event = catalog.get("2").expect("bundled event");
//! let card = EventCard::new(event, true, "jazz");
//!
//! assert_eq!(card.when, "Wed, Dec 18 at 20:00");
//! assert_eq!(card.title_highlights, vec![(0, 4)]);
//! ```

use crate::domain::Event;
use crate::search::highlight_ranges;

/// Label on the details screen's favorite button when the event is a favorite.
pub const FAVORITED_LABEL: &str = "★ Favorited";

/// Label on the details screen's favorite button otherwise.
pub const ADD_TO_FAVORITES_LABEL: &str = "☆ Add to Favorites";

/// One row of the event list or the favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub id: String,
    pub title: String,

    /// Short date and raw time, e.g. `"Sun, Dec 15 at 09:00"`.
    pub when: String,

    pub category: String,
    pub location: String,
    pub description: String,
    pub is_favorite: bool,

    /// Character ranges of `title` matching the active query.
    pub title_highlights: Vec<(usize, usize)>,
}

impl EventCard {
    #[must_use]
    pub fn new(event: &Event, is_favorite: bool, query: &str) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            when: format!("{} at {}", event.short_date(), event.time),
            category: event.category.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            is_favorite,
            title_highlights: highlight_ranges(&event.title, query),
        }
    }
}

/// Everything the details screen shows for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub id: String,
    pub title: String,

    /// Long date, e.g. `"Sunday, December 15, 2024"`.
    pub date: String,

    /// 12-hour time, e.g. `"9:00 AM"`.
    pub time: String,

    pub category: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_favorite: bool,

    /// Text of the favorite toggle button.
    pub favorite_label: &'static str,
}

impl EventDetail {
    #[must_use]
    pub fn new(event: &Event, is_favorite: bool) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.long_date(),
            time: event.display_time(),
            category: event.category.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            image_url: event.image_url.clone(),
            is_favorite,
            favorite_label: favorite_label(is_favorite),
        }
    }
}

/// Shown in place of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl EmptyState {
    #[must_use]
    pub fn no_matches(query: &str) -> Self {
        Self {
            message: "No events found".to_string(),
            subtitle: format!("Nothing matches \"{}\"", query.trim()),
        }
    }

    #[must_use]
    pub fn no_favorites() -> Self {
        Self {
            message: "No Favorite Events".to_string(),
            subtitle: "Start exploring events and mark them as favorites to see them here!"
                .to_string(),
        }
    }
}

/// A rendered list screen: the searchable event list or the favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub title: String,
    pub cards: Vec<EventCard>,
    pub empty_state: Option<EmptyState>,
}

/// Result of a favorite toggle, phrased for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleNotice {
    pub title: String,
    pub message: String,
}

impl ToggleNotice {
    #[must_use]
    pub fn applied(event_title: &str, is_favorite: bool) -> Self {
        if is_favorite {
            Self {
                title: "Added to Favorites".to_string(),
                message: format!("{event_title} has been added to your favorites."),
            }
        } else {
            Self {
                title: "Removed from Favorites".to_string(),
                message: format!("{event_title} has been removed from your favorites."),
            }
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            title: "Error".to_string(),
            message: "Failed to update favorites. Please try again.".to_string(),
        }
    }
}

#[must_use]
pub const fn favorite_label(is_favorite: bool) -> &'static str {
    if is_favorite {
        FAVORITED_LABEL
    } else {
        ADD_TO_FAVORITES_LABEL
    }
}
