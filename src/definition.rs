//! Typed view of a raw custom-type definition.
//!
//! Parsing only checks the structure each `type` tag needs. A tag outside the
//! known set is kept as [`FieldKind::Unrecognized`] so the build can carry on
//! without it.
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Ordered by authoring order; keys are unique within one collection.
pub type FieldCollection = IndexMap<String, FieldDefinition>;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub struct CustomTypeDefinition {
    /// tab name → fields authored under that tab
    pub tabs: IndexMap<String, FieldCollection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub config: FieldConfig,
    pub kind: FieldKind,
}

/// Authoring metadata; carried through as type descriptions only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConfig {
    pub label: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Leaf(LeafKind),
    Group { fields: FieldCollection },
    Slice(SliceDefinition),
    Slices { choices: FieldCollection },
    Unrecognized { tag: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceDefinition {
    /// `non-repeat`: the fixed primary shape
    pub non_repeat: FieldCollection,
    /// `repeat`: the shape of each item
    pub repeat: FieldCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Color,
    Select,
    Text,
    Uid,
    StructuredText,
    Number,
    Date,
    Timestamp,
    GeoPoint,
    Embed,
    Image,
    Link,
}

/// Location of a field inside a custom type, e.g. `page:body.quote.non-repeat.text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    custom_type: String,
    segments: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl LeafKind {
    pub const ALL: [LeafKind; 12] = [
        LeafKind::Color,
        LeafKind::Select,
        LeafKind::Text,
        LeafKind::Uid,
        LeafKind::StructuredText,
        LeafKind::Number,
        LeafKind::Date,
        LeafKind::Timestamp,
        LeafKind::GeoPoint,
        LeafKind::Embed,
        LeafKind::Image,
        LeafKind::Link,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            LeafKind::Color => "Color",
            LeafKind::Select => "Select",
            LeafKind::Text => "Text",
            LeafKind::Uid => "UID",
            LeafKind::StructuredText => "StructuredText",
            LeafKind::Number => "Number",
            LeafKind::Date => "Date",
            LeafKind::Timestamp => "Timestamp",
            LeafKind::GeoPoint => "GeoPoint",
            LeafKind::Embed => "Embed",
            LeafKind::Image => "Image",
            LeafKind::Link => "Link",
        }
    }
}

impl FieldKind {
    /// The `type` tag this kind was parsed from.
    pub fn tag(&self) -> &str {
        match self {
            FieldKind::Leaf(leaf) => leaf.tag(),
            FieldKind::Group { .. } => "Group",
            FieldKind::Slice(_) => "Slice",
            FieldKind::Slices { .. } => "Slices",
            FieldKind::Unrecognized { tag } => tag.as_str(),
        }
    }
}

impl CustomTypeDefinition {
    pub fn from_json(custom_type_id: &str, value: &Value) -> Result<Self> {
        let root = FieldPath::root(custom_type_id);
        let tabs = as_object(&root, value, "custom type must be an object of tabs")?;
        let mut out = IndexMap::with_capacity(tabs.len());
        for (tab, fields) in tabs {
            // Tab names are not part of any field path.
            out.insert(tab.clone(), parse_collection(&root, fields)?);
        }
        Ok(Self { tabs: out })
    }
}

impl FieldDefinition {
    pub fn from_json(path: &FieldPath, value: &Value) -> Result<Self> {
        let object = as_object(path, value, "field definition must be an object")?;
        let tag = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::malformed(path, "missing string `type` tag"))?;
        let config = object.get("config").and_then(Value::as_object);

        let kind = match tag {
            "Group" => {
                let fields = config
                    .and_then(|c| c.get("fields"))
                    .ok_or_else(|| SchemaError::malformed(path, "Group is missing `config.fields`"))?;
                FieldKind::Group { fields: parse_collection(path, fields)? }
            }
            "Slice" => FieldKind::Slice(SliceDefinition {
                non_repeat: parse_optional_collection(path, object, "non-repeat")?,
                repeat: parse_optional_collection(path, object, "repeat")?,
            }),
            "Slices" => {
                let choices = config
                    .and_then(|c| c.get("choices"))
                    .ok_or_else(|| SchemaError::malformed(path, "Slices is missing `config.choices`"))?;
                FieldKind::Slices { choices: parse_collection(path, choices)? }
            }
            other => match LeafKind::from_tag(other) {
                Some(leaf) => FieldKind::Leaf(leaf),
                None => FieldKind::Unrecognized { tag: other.to_string() },
            },
        };

        Ok(Self {
            config: FieldConfig::from_json(config),
            kind,
        })
    }
}

impl FieldConfig {
    fn from_json(config: Option<&Map<String, Value>>) -> Self {
        let text = |key: &str| {
            config
                .and_then(|c| c.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            label: text("label"),
            placeholder: text("placeholder"),
        }
    }

    /// `label`, then `placeholder` as a second paragraph.
    pub fn description(&self) -> Option<String> {
        match (&self.label, &self.placeholder) {
            (Some(label), Some(placeholder)) => Some(format!("{label}\n\n{placeholder}")),
            (Some(text), None) | (None, Some(text)) => Some(text.clone()),
            (None, None) => None,
        }
    }
}

impl FieldPath {
    pub fn root(custom_type: &str) -> Self {
        Self {
            custom_type: custom_type.to_string(),
            segments: Vec::new(),
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self {
            custom_type: self.custom_type.clone(),
            segments,
        }
    }

    pub fn custom_type(&self) -> &str {
        &self.custom_type
    }

    /// Number of segments below the custom type.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.custom_type)?;
        for (i, segment) in self.segments.iter().enumerate() {
            f.write_str(if i == 0 { ":" } else { "." })?;
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn as_object<'a>(path: &FieldPath, value: &'a Value, reason: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| SchemaError::malformed(path, reason))
}

fn parse_collection(parent: &FieldPath, value: &Value) -> Result<FieldCollection> {
    let entries = as_object(parent, value, "field collection must be an object")?;
    let mut out = FieldCollection::with_capacity(entries.len());
    for (id, field) in entries {
        out.insert(id.clone(), FieldDefinition::from_json(&parent.child(id), field)?);
    }
    Ok(out)
}

/// `non-repeat` / `repeat` are left out of the JSON entirely when empty.
fn parse_optional_collection(
    path: &FieldPath,
    object: &Map<String, Value>,
    key: &str,
) -> Result<FieldCollection> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(FieldCollection::new()),
        Some(value) => parse_collection(&path.child(key), value),
    }
}
