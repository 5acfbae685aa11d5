//! Schema types for flow elements.
//!
//! This module contains the data structures describing known elements:
//! - [`ElementMeta`] - One element (tag) and its attributes
//! - [`AttributeMeta`] - One attribute, its type and allowed values
//! - [`AttributeValues`] - Flat options or multi-value slots
//!
//! Every JSON object is read into an [`IndexMap`]: slot order of multi-value
//! attributes and the order of required attributes in generated snippets
//! both follow declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Element definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Human readable title (e.g., "Button")
    #[serde(default)]
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// URL to documentation
    #[serde(default)]
    pub doc_link: String,

    /// Catalogue category (e.g., "Layout")
    #[serde(default)]
    pub category: String,

    /// Child elements generated inside a tag snippet
    #[serde(default)]
    pub subtags: Vec<String>,

    /// Attributes pre-filled in a tag snippet
    #[serde(default)]
    pub defaults: Vec<String>,

    /// Attribute definitions in declaration order
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeMeta>,
}

impl ElementMeta {
    pub fn attribute(&self, name: &str) -> Option<&AttributeMeta> {
        self.attributes.get(name)
    }

    /// Names of required attributes in declaration order.
    pub fn required_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.is_required)
            .map(|(name, _)| name.as_str())
    }
}

/// Attribute type.
///
/// Type names outside the known set are kept verbatim so hover can show them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum AttributeType {
    /// Bare attribute with no value (`<f-icon clickable>`)
    Flag,
    /// Event handler, bound with `@`
    Method,
    Boolean,
    #[default]
    String,
    Number,
    Other(String),
}

impl AttributeType {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::Flag => "flag",
            AttributeType::Method => "method",
            AttributeType::Boolean => "boolean",
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Other(name) => name,
        }
    }
}

impl From<String> for AttributeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "flag" => AttributeType::Flag,
            "method" => AttributeType::Method,
            "boolean" => AttributeType::Boolean,
            "string" => AttributeType::String,
            "number" => AttributeType::Number,
            _ => AttributeType::Other(value),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation for one literal option of an attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMeta {
    pub description: Option<String>,
}

/// The `values` of an attribute.
#[derive(Debug, Clone)]
pub enum AttributeValues {
    /// Flat enumeration of literal options
    Options(IndexMap<String, ValueMeta>),
    /// Space separated composite value; one sub-attribute per slot
    Slots(IndexMap<String, AttributeMeta>),
}

/// Attribute definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawAttributeMeta")]
pub struct AttributeMeta {
    pub description: Option<String>,
    pub is_required: bool,
    pub attr_type: AttributeType,
    pub default: Option<String>,
    pub multi_values: bool,
    pub values: Option<AttributeValues>,
}

impl AttributeMeta {
    /// Flat options, if this attribute enumerates literal values.
    pub fn options(&self) -> Option<&IndexMap<String, ValueMeta>> {
        match &self.values {
            Some(AttributeValues::Options(options)) => Some(options),
            _ => None,
        }
    }

    /// Value slots, if this is a multi-value attribute.
    pub fn slots(&self) -> Option<&IndexMap<String, AttributeMeta>> {
        match &self.values {
            Some(AttributeValues::Slots(slots)) => Some(slots),
            _ => None,
        }
    }

    pub fn is_method(&self) -> bool {
        self.attr_type == AttributeType::Method
    }
}

/// Wire shape of an attribute.
///
/// `values` entries are decoded as attributes first; a plain value entry
/// (`{ "description": ... }`) is a valid attribute with every other field
/// defaulted, and `multiValues` decides which interpretation is kept.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttributeMeta {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_required: bool,
    #[serde(rename = "type", default)]
    attr_type: AttributeType,
    #[serde(default, deserialize_with = "deserialize_default_value")]
    default: Option<String>,
    #[serde(default)]
    multi_values: bool,
    #[serde(default)]
    values: Option<IndexMap<String, AttributeMeta>>,
}

impl From<RawAttributeMeta> for AttributeMeta {
    fn from(raw: RawAttributeMeta) -> Self {
        let values = raw.values.map(|values| {
            if raw.multi_values {
                AttributeValues::Slots(values)
            } else {
                AttributeValues::Options(
                    values
                        .into_iter()
                        .map(|(key, meta)| {
                            (
                                key,
                                ValueMeta {
                                    description: meta.description,
                                },
                            )
                        })
                        .collect(),
                )
            }
        });

        Self {
            description: raw.description,
            is_required: raw.is_required,
            attr_type: raw.attr_type,
            default: raw.default,
            multi_values: raw.multi_values,
            values,
        }
    }
}

/// Custom deserializer for default values that can be string, number, or bool
fn deserialize_default_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(D::Error::custom("unexpected type for default value")),
    }
}
