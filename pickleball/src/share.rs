//! Spectator share links.
//!
//! Links use a hash route so a static host can serve them:
//! `https://host/app/#/event/{id}`.

use crate::event::EventId;

const EVENT_ROUTE: &str = "#/event/";

/// Build the public link for an event
pub fn event_share_url(base_url: &str, event_id: &str) -> String {
    let base = base_url.split('#').next().unwrap_or_default();
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}/{EVENT_ROUTE}{event_id}")
}

/// Extract the event id from a link or bare fragment
///
/// Accepts a full URL, `#/event/{id}` or `/event/{id}`.
pub fn parse_share_fragment(link: &str) -> Option<EventId> {
    let fragment = match link.find('#') {
        Some(i) => &link[i..],
        None => link,
    };
    let id = fragment
        .strip_prefix(EVENT_ROUTE)
        .or_else(|| fragment.strip_prefix(&EVENT_ROUTE[1..]))?;
    let id = id.split(['/', '?']).next().unwrap_or_default();

    (!id.is_empty()).then(|| id.to_string())
}
