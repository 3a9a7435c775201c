use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============ Identifiers ============

/// Opaque identifier of a guidepost (an OSM node id in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuidePostId(String);

impl GuidePostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuidePostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============ Attributes ============

/// Attribute bag returned by the attributes API.
///
/// No schema is imposed beyond "a JSON object"; the display layer decides
/// which keys it understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuidePostAttributes(Map<String, Value>);

impl GuidePostAttributes {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Node identifier the guidepost is stored under (`id`, string or integer).
    pub fn node_id(&self) -> Option<GuidePostId> {
        match self.0.get("id")? {
            Value::String(s) if !s.trim().is_empty() => Some(GuidePostId::new(s.trim())),
            Value::Number(n) => Some(GuidePostId::new(n.to_string())),
            _ => None,
        }
    }

    /// `lon` as decimal degrees.
    pub fn longitude(&self) -> Option<f64> {
        self.0.get("lon").and_then(number_value)
    }

    /// `lat` as decimal degrees.
    pub fn latitude(&self) -> Option<f64> {
        self.0.get("lat").and_then(number_value)
    }

    /// `(lon, lat)` when both are present.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        Some((self.longitude()?, self.latitude()?))
    }
}

impl FromIterator<(String, Value)> for GuidePostAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads a JSON number, or a string holding one.
fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

// ============ Destinations ============

/// One directional entry of a destination sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Bearing in degrees.
    #[serde(rename = "dir", default, deserialize_with = "lenient_bearing")]
    pub direction: f64,
    /// Label shown on the sign.
    #[serde(default, deserialize_with = "lenient_label")]
    pub destination: String,
    /// Travel time as `H:MM`.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    /// Distance in meters.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<f64>,
}

impl Destination {
    pub fn new(direction: f64, destination: impl Into<String>) -> Self {
        Self {
            direction,
            destination: destination.into(),
            duration: None,
            distance: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// Body of the destination sign generator (`format=json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationResponse {
    pub data: Vec<Destination>,
}

// The generator is loose about types: numbers come back as strings and
// vice versa. Anything unusable degrades to "absent" instead of failing
// the whole payload.

fn lenient_bearing<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(number_value(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(number_value(&Value::deserialize(deserializer)?))
}
