//! Host container abstraction.
//!
//! The sidebar never owns its rendering target. Whatever hosts it (a DOM
//! bridge, a terminal UI, a test double) implements [`SidebarView`] and lends
//! it to each load.

use serde::{Deserialize, Serialize};

/// Independently shown/hidden parts of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    /// Attribute fields of the guidepost.
    Data,
    /// Attributes could not be loaded.
    Error,
    /// Destination table.
    DestinationData,
    /// Destinations could not be loaded.
    DestinationError,
}

impl Region {
    pub const ALL: [Self; 4] = [
        Self::Data,
        Self::Error,
        Self::DestinationData,
        Self::DestinationError,
    ];
}

/// Rendered value of one display field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldContent {
    Text { text: String },
    Link { href: String, label: String },
    Lines { lines: Vec<String> },
}

impl FieldContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Geographic extent in degrees, `[min_lon, min_lat, max_lon, max_lat]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Margin used when framing a single guidepost.
    pub const FRAMING_MARGIN: f64 = 0.001;

    /// Square box of `margin` degrees around a point.
    pub fn around(lon: f64, lat: f64, margin: f64) -> Self {
        Self {
            min_lon: lon - margin,
            min_lat: lat - margin,
            max_lon: lon + margin,
            max_lat: lat + margin,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&lon) && (self.min_lat..=self.max_lat).contains(&lat)
    }
}

/// One formatted line of the destination table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRow {
    /// Bearing the arrow is rotated by, in degrees.
    pub direction: f64,
    /// Destination label, verbatim (plain text, not markup).
    pub label: String,
    /// Duration/distance cell as an HTML fragment; may be empty.
    pub travel: String,
}

impl DestinationRow {
    /// Heavy wide-headed rightwards arrow (`&#10137;`).
    pub const ARROW: char = '\u{2799}';

    /// Inline style that points [`Self::ARROW`] along the bearing.
    pub fn arrow_style(&self) -> String {
        format!("transform: rotate({}deg);", self.direction)
    }
}

/// Rendering target lent to the sidebar by its host.
///
/// Implementations take `&self`; a DOM-like host already has interior
/// mutability, test doubles use a mutex.
pub trait SidebarView: Send + Sync {
    fn set_region_visible(&self, region: Region, visible: bool);

    /// Drop the "has data" marker and content of a field.
    fn clear_field(&self, field: &str);

    /// Fill a field and mark it as having data.
    fn fill_field(&self, field: &str, content: FieldContent);

    fn set_group_visible(&self, group: &str, visible: bool);

    fn clear_destinations(&self);

    fn append_destination(&self, row: &DestinationRow);

    /// Ask the host map to show `bbox`.
    fn fit_view(&self, bbox: BoundingBox);

    fn hide_all(&self) {
        for region in Region::ALL {
            self.set_region_visible(region, false);
        }
    }
}
