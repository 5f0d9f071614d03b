//! Serde model of a schema document.
//!
//! A document is a list of named schemas whose fields refer to primitive
//! types, lists, or other schemas of the same document by name. The model is
//! format-agnostic: YAML, TOML and JSON all deserialize into it.

use schemata_core::Constraint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Schema declarations, in document order
    pub schemas: Vec<SchemaEntry>,
}

/// Declaration of one named schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaEntry {
    /// Schema name, referenced by other schemas' field types
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Field declarations, in order
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// Declaration of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    /// Field name
    pub name: String,

    /// Type expression (`string`, `list<url>`, `Photo`, ...)
    #[serde(rename = "type")]
    pub field_type: String,

    /// Whether the field must be present (defaults to true)
    #[serde(default = "default_required")]
    pub required: bool,

    /// Raw default for an absent optional field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constraints on the field's value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

fn default_required() -> bool {
    true
}
