//! Screen composition.
//!
//! Each function here marks its screen visible (reloading that screen's favorites
//! index) and then builds the view model from the fresh index. A failed reload
//! still renders, from the membership the screen showed before.

use crate::app::explorer::EventExplorer;
use crate::domain::error::Result;
use crate::sync::ScreenId;
use crate::ui::viewmodel::{EmptyState, EventCard, EventDetail, ListView};

const EVENT_LIST_TITLE: &str = "Event Explorer";
const FAVORITES_TITLE: &str = "My Favorites";

/// The searchable event list.
pub async fn event_list(explorer: &EventExplorer, query: &str) -> ListView {
    let screen = ScreenId::EVENT_LIST;
    become_visible(explorer, &screen).await;

    let index = explorer.coordinator().snapshot(&screen).await.unwrap_or_default();
    let cards: Vec<EventCard> = explorer
        .filtered_events(query)
        .into_iter()
        .map(|event| EventCard::new(event, index.is_favorite(&event.id), query))
        .collect();

    let empty_state = cards.is_empty().then(|| EmptyState::no_matches(query));
    ListView {
        title: EVENT_LIST_TITLE.to_string(),
        cards,
        empty_state,
    }
}

/// The favorites list, in catalog order.
pub async fn favorites(explorer: &EventExplorer) -> ListView {
    let screen = ScreenId::FAVORITES;
    become_visible(explorer, &screen).await;

    if let Some(index) = explorer.coordinator().snapshot(&screen).await {
        let dangling = explorer.catalog().dangling_ids(index.ids());
        if !dangling.is_empty() {
            tracing::debug!(?dangling, "favorites without a catalog event are hidden");
        }
    }

    let cards: Vec<EventCard> = explorer
        .favorite_events(&screen)
        .await
        .into_iter()
        .map(|event| EventCard::new(event, true, ""))
        .collect();

    let empty_state = cards.is_empty().then(EmptyState::no_favorites);
    ListView {
        title: FAVORITES_TITLE.to_string(),
        cards,
        empty_state,
    }
}

/// The details of one event.
///
/// # Errors
///
/// Returns [`crate::EventExplorerError::EventNotFound`] if `id` is not in the catalog.
pub async fn event_details(explorer: &EventExplorer, id: &str) -> Result<EventDetail> {
    let event = explorer.event(id)?;
    let screen = ScreenId::EVENT_DETAILS;
    become_visible(explorer, &screen).await;

    let is_favorite = explorer.is_favorite(&screen, id).await;
    Ok(EventDetail::new(event, is_favorite))
}

async fn become_visible(explorer: &EventExplorer, screen: &ScreenId) {
    if let Err(e) = explorer.on_became_visible(screen).await {
        tracing::warn!(screen = %screen, error = %e, "rendering from previous favorites state");
    }
}
