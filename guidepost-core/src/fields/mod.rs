//! Attribute-to-field projection.
//!
//! A container declares the fields it can show once, as a [`DisplaySpec`].
//! Each load then projects whatever attribute bag arrived onto that
//! declaration: fields whose key is present are rendered and marked, the rest
//! stay cleared, and optional groups are shown only when one of their fields
//! has data.

mod renderers;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::view::SidebarView;
use crate::GuidePostAttributes;

/// Renderer kind of a display field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain text.
    Text,
    /// One coordinate axis in decimal degrees.
    Coordinate,
    /// `lat, lon` pair taken from the sibling attributes.
    Position,
    /// Height in meters.
    Elevation,
    /// External link.
    Url,
    /// Key/value object, one `key=value` line each.
    Tags,
}

impl FieldKind {
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Coordinate,
        Self::Position,
        Self::Elevation,
        Self::Url,
        Self::Tags,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Coordinate => "coordinate",
            Self::Position => "position",
            Self::Elevation => "elevation",
            Self::Url => "url",
            Self::Tags => "tags",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownFieldKind(s.to_string()))
    }
}

/// Declaration of one display field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Attribute key the field shows.
    pub field: String,
    pub kind: FieldKind,
    /// Optional group the field belongs to; such groups stay hidden unless
    /// at least one member has data.
    #[serde(rename = "group", default, skip_serializing_if = "Option::is_none")]
    pub optional_group: Option<String>,
}

impl FieldSpec {
    pub fn new(field: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field: field.into(),
            kind,
            optional_group: None,
        }
    }

    #[must_use]
    pub fn optional(mut self, group: impl Into<String>) -> Self {
        self.optional_group = Some(group.into());
        self
    }
}

/// Field declaration as written in configuration (kind still a string).
#[derive(Deserialize)]
struct RawFieldSpec {
    field: String,
    kind: String,
    #[serde(default)]
    group: Option<String>,
}

/// Result of projecting one attribute bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Declared fields whose key was present.
    pub populated: BTreeSet<String>,
    /// Optional groups that were revealed.
    pub visible_groups: BTreeSet<String>,
}

/// Validated set of display fields, declared once per container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplaySpec {
    fields: Vec<FieldSpec>,
}

impl DisplaySpec {
    /// Validate a field list: names must be non-empty and unique.
    ///
    /// Field and group names are stored trimmed, so ` name ` is looked up as
    /// the attribute `name`.
    pub fn new(mut fields: Vec<FieldSpec>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for spec in &mut fields {
            let name = spec.field.trim().to_string();
            if name.is_empty() {
                return Err(CoreError::InvalidDisplaySpec(
                    "field name must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(CoreError::InvalidDisplaySpec(format!(
                    "field `{name}` declared twice"
                )));
            }
            if let Some(group) = spec.optional_group.as_mut() {
                let trimmed = group.trim().to_string();
                if trimmed.is_empty() {
                    return Err(CoreError::InvalidDisplaySpec(format!(
                        "field `{name}` has an empty group name"
                    )));
                }
                *group = trimmed;
            }
            spec.field = name;
        }
        Ok(Self { fields })
    }

    /// Parse a JSON field list:
    ///
    /// ```json
    /// [{"field": "name", "kind": "text"},
    ///  {"field": "ele", "kind": "elevation", "group": "extra"}]
    /// ```
    ///
    /// Unknown kinds are rejected here, never at render time.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: Vec<RawFieldSpec> = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidDisplaySpec(e.to_string()))?;
        let fields = raw
            .into_iter()
            .map(|r| -> CoreResult<FieldSpec> {
                Ok(FieldSpec {
                    field: r.field,
                    kind: r.kind.parse()?,
                    optional_group: r.group,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(fields)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Distinct optional groups, in declaration order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.fields.iter().filter_map(|f| f.optional_group.as_deref()) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    /// Project `attrs` onto the declared fields of `view`.
    pub fn apply(&self, view: &dyn SidebarView, attrs: &GuidePostAttributes) -> FieldMapping {
        for spec in &self.fields {
            view.clear_field(&spec.field);
        }
        for group in self.groups() {
            view.set_group_visible(group, false);
        }

        let mut mapping = FieldMapping::default();
        for spec in &self.fields {
            let Some(value) = attrs.get(&spec.field) else {
                continue;
            };
            let content = renderers::renderer_for(spec.kind)(&spec.field, value, attrs);
            view.fill_field(&spec.field, content);
            mapping.populated.insert(spec.field.clone());
            if let Some(group) = &spec.optional_group {
                mapping.visible_groups.insert(group.clone());
            }
        }

        for group in &mapping.visible_groups {
            view.set_group_visible(group, true);
        }

        log::debug!(
            "Mapped {} of {} declared fields",
            mapping.populated.len(),
            self.fields.len()
        );
        mapping
    }
}
