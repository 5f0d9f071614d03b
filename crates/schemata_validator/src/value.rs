//! Coerced values and validated records.
//!
//! This module provides the types produced by a successful validation.

use chrono::{DateTime, FixedOffset};
use url::Url;

/// A coerced field value.
///
/// Every field of a [`ValidatedObject`] holds one of these. An optional field
/// that was absent (or explicitly null) holds [`FieldValue::Empty`], which is
/// distinct from the field not being declared at all.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Placeholder for an absent optional field
    Empty,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// Timestamp with its original UTC offset
    Timestamp(DateTime<FixedOffset>),
    /// Normalized http(s) URL
    Url(Url),
    /// Nested record
    Object(ValidatedObject),
    /// List of values
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns true if this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Empty => "empty",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::String(_) => "string",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Url(_) => "url",
            FieldValue::Object(_) => "object",
            FieldValue::List(_) => "list",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Attempts to get this value as a URL.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            FieldValue::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Attempts to get this value as a nested record.
    pub fn as_object(&self) -> Option<&ValidatedObject> {
        match self {
            FieldValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Attempts to get this value as a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the canonical text form of a scalar value.
    ///
    /// Used to compare against allowed values. Returns `None` for the empty
    /// sentinel, nested records and lists.
    pub fn canonical_text(&self) -> Option<String> {
        match self {
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Timestamp(ts) => Some(crate::serialize::format_timestamp(ts)),
            FieldValue::Url(url) => Some(url.to_string()),
            FieldValue::Empty | FieldValue::Object(_) | FieldValue::List(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

/// A record that passed validation against a schema.
///
/// Holds every declared field, in schema order, with its coerced value.
/// Absent optional fields hold [`FieldValue::Empty`]. There is no way to
/// mutate a validated object; build a new raw mapping and validate it again.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedObject {
    schema: String,
    fields: Vec<(String, FieldValue)>,
}

impl ValidatedObject {
    pub(crate) fn new(schema: impl Into<String>, fields: Vec<(String, FieldValue)>) -> Self {
        Self {
            schema: schema.into(),
            fields,
        }
    }

    /// Returns the name of the schema this object was validated against.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// Gets a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Returns an iterator over `(name, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
