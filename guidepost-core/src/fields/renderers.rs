//! Renderer table: one function per [`FieldKind`].

use serde_json::Value;
use url::Url;

use super::FieldKind;
use crate::view::FieldContent;
use crate::GuidePostAttributes;

/// `(field name, raw value, whole attribute bag) -> content`
pub(crate) type Renderer = fn(&str, &Value, &GuidePostAttributes) -> FieldContent;

pub(crate) fn renderer_for(kind: FieldKind) -> Renderer {
    match kind {
        FieldKind::Text => render_text,
        FieldKind::Coordinate => render_coordinate,
        FieldKind::Position => render_position,
        FieldKind::Elevation => render_elevation,
        FieldKind::Url => render_url,
        FieldKind::Tags => render_tags,
    }
}

fn render_text(_field: &str, value: &Value, _attrs: &GuidePostAttributes) -> FieldContent {
    FieldContent::text(plain_text(value))
}

/// Single axis in degrees; the axis follows the field name (`lat*` is north/south).
fn render_coordinate(field: &str, value: &Value, attrs: &GuidePostAttributes) -> FieldContent {
    let Some(degrees) = number(value) else {
        return render_text(field, value, attrs);
    };
    let (positive, negative) = if field.to_ascii_lowercase().starts_with("lat") {
        ('N', 'S')
    } else {
        ('E', 'W')
    };
    let hemisphere = if degrees < 0.0 { negative } else { positive };
    FieldContent::text(format!("{:.5}° {hemisphere}", degrees.abs()))
}

/// `lat, lon` from the sibling keys, whatever field it is declared on.
fn render_position(field: &str, value: &Value, attrs: &GuidePostAttributes) -> FieldContent {
    match (attrs.latitude(), attrs.longitude()) {
        (Some(lat), Some(lon)) => FieldContent::text(format!("{lat:.5}, {lon:.5}")),
        _ => render_text(field, value, attrs),
    }
}

fn render_elevation(field: &str, value: &Value, attrs: &GuidePostAttributes) -> FieldContent {
    match number(value) {
        Some(meters) => FieldContent::text(format!("{meters:.0} m")),
        None => render_text(field, value, attrs),
    }
}

fn render_url(field: &str, value: &Value, attrs: &GuidePostAttributes) -> FieldContent {
    let parsed = value
        .as_str()
        .and_then(|s| Url::parse(s.trim()).ok())
        .filter(|u| matches!(u.scheme(), "http" | "https"));
    let Some(url) = parsed else {
        return render_text(field, value, attrs);
    };
    let label = format!(
        "{}{}",
        url.host_str().unwrap_or_default(),
        url.path().trim_end_matches('/')
    );
    FieldContent::Link {
        href: url.to_string(),
        label,
    }
}

fn render_tags(field: &str, value: &Value, attrs: &GuidePostAttributes) -> FieldContent {
    let Value::Object(map) = value else {
        return render_text(field, value, attrs);
    };
    let mut lines: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{k}={}", plain_text(v)))
        .collect();
    lines.sort();
    FieldContent::Lines { lines }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain_text).collect::<Vec<_>>().join(", "),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}
