//! Destination table: ordering and travel-cell formatting.

use crate::view::{DestinationRow, SidebarView};
use crate::Destination;

/// Separator between duration and distance in the travel cell.
const TRAVEL_SEPARATOR: &str = " / ";

/// Stable sort by bearing; equal bearings keep their input order.
pub fn sort_by_direction(destinations: &mut [Destination]) {
    destinations.sort_by(|a, b| a.direction.total_cmp(&b.direction));
}

/// Format an `H:MM` duration.
///
/// Anything that is not exactly two numeric parts yields `None`. Minutes are
/// shown with their original text so `2:05` stays `2h&nbsp;05`.
pub fn format_duration(raw: &str) -> Option<String> {
    let mut parts = raw.split(':');
    let (Some(hours_text), Some(minutes_text), None) = (parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let minutes_text = minutes_text.trim();
    let hours: u32 = hours_text.trim().parse().ok()?;
    let minutes: u32 = minutes_text.parse().ok()?;

    Some(if hours < 1 {
        format!("{minutes}min")
    } else if minutes > 0 {
        format!("{hours}h&nbsp;{minutes_text}")
    } else {
        format!("{hours}h")
    })
}

/// Format a distance in meters: `<d>m` below one kilometre, `<d/1000>km` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters}m")
    } else {
        format!("{}km", meters / 1000.0)
    }
}

/// Travel cell of one destination; empty when neither value is usable.
pub fn travel_text(destination: &Destination) -> String {
    let mut text = destination
        .duration
        .as_deref()
        .and_then(format_duration)
        .unwrap_or_default();

    if let Some(distance) = destination
        .distance
        .filter(|d| d.is_finite() && *d > 0.0)
    {
        if !text.is_empty() {
            text.push_str(TRAVEL_SEPARATOR);
        }
        text.push_str(&format_distance(distance));
    }
    text
}

/// Sort and format destinations into table rows.
pub fn build_rows(mut destinations: Vec<Destination>) -> Vec<DestinationRow> {
    sort_by_direction(&mut destinations);
    destinations
        .into_iter()
        .map(|d| DestinationRow {
            direction: d.direction,
            travel: travel_text(&d),
            label: d.destination,
        })
        .collect()
}

/// Append the rows to the (already cleared) destination table of `view`.
pub fn render(view: &dyn SidebarView, destinations: Vec<Destination>) -> usize {
    let rows = build_rows(destinations);
    for row in &rows {
        view.append_destination(row);
    }
    rows.len()
}
