//! Serialization of validated objects back to plain data.
//!
//! Validated objects serialize to a JSON-compatible mapping in schema order.
//! Empty fields become `null`, timestamps are written as RFC 3339 and URLs in
//! their normalized form. Feeding the output back through validation with the
//! same schema yields an equal object.

use crate::{FieldValue, ValidatedObject};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

/// Formats a timestamp as RFC 3339, using `Z` for UTC.
pub(crate) fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Converts a validated object to a mapping, leaving out the named fields.
///
/// Exclusion applies to top-level fields only. Names that are not fields of
/// the object are ignored.
pub fn to_mapping(object: &ValidatedObject, exclude: &[&str]) -> Map<String, Value> {
    object
        .fields()
        .filter(|(name, _)| !exclude.contains(name))
        .map(|(name, value)| (name.to_string(), to_value(value)))
        .collect()
}

/// Converts a validated object to pretty-printed JSON.
pub fn to_json(object: &ValidatedObject, exclude: &[&str]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Value::Object(to_mapping(object, exclude)))
}

fn to_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Empty => Value::Null,
        FieldValue::Integer(i) => Value::from(*i),
        FieldValue::Float(f) => Value::from(*f),
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Timestamp(ts) => Value::String(format_timestamp(ts)),
        FieldValue::Url(url) => Value::String(url.to_string()),
        FieldValue::Object(object) => Value::Object(to_mapping(object, &[])),
        FieldValue::List(items) => Value::Array(items.iter().map(to_value).collect()),
    }
}

impl ValidatedObject {
    /// Converts this object to a mapping. See [`to_mapping`].
    pub fn to_mapping(&self, exclude: &[&str]) -> Map<String, Value> {
        to_mapping(self, exclude)
    }

    /// Converts this object to pretty-printed JSON. See [`to_json`].
    pub fn to_json(&self, exclude: &[&str]) -> serde_json::Result<String> {
        to_json(self, exclude)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Empty => serializer.serialize_none(),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Timestamp(ts) => serializer.serialize_str(&format_timestamp(ts)),
            FieldValue::Url(url) => serializer.serialize_str(url.as_str()),
            FieldValue::Object(object) => object.serialize(serializer),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for ValidatedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
