//! Guidepost identifier resolution from navigation state.
//!
//! Navigation state is a URL fragment such as `#?id=2287441025`. The host map
//! keeps its own view in the same fragment (`#map=14/47.3/8.5`); a fragment
//! carrying `map=` belongs to the map and never selects a guidepost.

use std::sync::LazyLock;

use regex::Regex;

use crate::GuidePostId;

/// A `map` key anywhere in the fragment.
static MAP_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[#?&])map=").unwrap_or_else(|e| unreachable!("static regex: {e}"))
});

/// Whether the fragment is map state.
pub fn is_map_state(nav_state: &str) -> bool {
    MAP_KEY.is_match(nav_state)
}

/// Resolve the guidepost identifier carried by `nav_state`.
///
/// Returns `None` when the fragment is map state, has no `id` key, or the
/// value is empty or undecodable. The last `id` wins when repeated.
pub fn resolve(nav_state: &str) -> Option<GuidePostId> {
    if is_map_state(nav_state) {
        return None;
    }

    // Keys are separated by `#`, `?` or `&`; only a key that is exactly `id`
    // counts, so `idx=3` after `id=5` leaves `5` in place.
    let raw = nav_state
        .split(['#', '?', '&'])
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            key.eq_ignore_ascii_case("id").then_some(value)
        })
        .last()?;

    match urlencoding::decode(raw) {
        Ok(decoded) if !decoded.is_empty() => Some(GuidePostId::new(decoded.into_owned())),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Ignoring undecodable guidepost id `{raw}`: {e}");
            None
        }
    }
}

/// Navigation target captured when the sidebar is created.
///
/// A deep link to a guidepost frames the map on it once it has loaded; map
/// state and empty fragments are not targets.
pub fn pending_target(initial_nav_state: &str) -> Option<String> {
    if initial_nav_state.is_empty() || is_map_state(initial_nav_state) {
        None
    } else {
        Some(initial_nav_state.to_string())
    }
}
