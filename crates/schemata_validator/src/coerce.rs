//! Coercion of raw JSON values to declared primitive types.
//!
//! Coercion is lenient in the usual ways: numeric strings become numbers,
//! integral floats become integers, numbers become strings, and common
//! boolean spellings are recognized. Anything else fails with the
//! [`Violation`] named after the target type.

use crate::{FieldValue, Violation};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};
use schemata_core::PrimitiveType;
use serde_json::Value;
use url::Url;

/// Longest URL accepted by the `url` type.
pub const MAX_URL_LENGTH: usize = 2083;

/// Years that serialize to a four-digit RFC 3339 year.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Numeric timestamps above this magnitude are read as milliseconds.
const MS_WATERSHED: f64 = 2e10;

/// Offset-carrying layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Layouts without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Coerces a raw value to the given primitive type.
///
/// `raw` must not be null; null handling depends on field optionality and is
/// decided by the caller.
pub fn coerce_primitive(primitive: PrimitiveType, raw: &Value) -> Result<FieldValue, Violation> {
    match primitive {
        PrimitiveType::Integer => coerce_integer(raw).map(FieldValue::Integer),
        PrimitiveType::Float => coerce_float(raw).map(FieldValue::Float),
        PrimitiveType::Boolean => coerce_boolean(raw).map(FieldValue::Boolean),
        PrimitiveType::String => coerce_string(raw).map(FieldValue::String),
        PrimitiveType::Timestamp => coerce_timestamp(raw).map(FieldValue::Timestamp),
        PrimitiveType::Url => match raw {
            Value::String(s) => parse_url(s).map(FieldValue::Url),
            _ => Err(Violation::invalid_url("str type expected")),
        },
    }
}

fn coerce_integer(raw: &Value) -> Result<i64, Violation> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(Violation::NotInteger),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| Violation::NotInteger),
        _ => Err(Violation::NotInteger),
    }
}

fn coerce_float(raw: &Value) -> Result<f64, Violation> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|f| f.is_finite())
        .ok_or(Violation::NotFloat)
}

fn coerce_boolean(raw: &Value) -> Result<bool, Violation> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(Violation::NotBoolean),
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
            _ => Err(Violation::NotBoolean),
        },
        _ => Err(Violation::NotBoolean),
    }
}

fn coerce_string(raw: &Value) -> Result<String, Violation> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Violation::NotString),
    }
}

fn coerce_timestamp(raw: &Value) -> Result<DateTime<FixedOffset>, Violation> {
    let ts = match raw {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_f64().and_then(from_unix),
        _ => None,
    };
    ts.filter(|ts| YEAR_RANGE.contains(&ts.year()))
        .ok_or(Violation::InvalidTimestamp)
}

/// Parses an ISO-8601-like timestamp.
///
/// Accepts RFC 3339, a space instead of `T`, optional fractional seconds and
/// an optional offset. Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts);
    }
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(input, format) {
            return Some(ts);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    None
}

/// Converts Unix seconds (or milliseconds, for large magnitudes) to UTC.
fn from_unix(value: f64) -> Option<DateTime<FixedOffset>> {
    if !value.is_finite() {
        return None;
    }
    let seconds = if value.abs() > MS_WATERSHED {
        value / 1000.0
    } else {
        value
    };
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|ts| ts.fixed_offset())
}

/// Parses and normalizes an http(s) URL.
///
/// The URL must be absolute, use the `http` or `https` scheme, have a
/// non-empty host and be at most [`MAX_URL_LENGTH`] characters long once
/// normalized (percent-encoding included).
pub fn parse_url(input: &str) -> Result<Url, Violation> {
    let input = input.trim();

    let url = Url::parse(input).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => {
            Violation::invalid_url("invalid or missing URL scheme")
        }
        url::ParseError::EmptyHost
        | url::ParseError::InvalidDomainCharacter
        | url::ParseError::InvalidIpv4Address
        | url::ParseError::InvalidIpv6Address => Violation::invalid_url("URL host invalid"),
        other => Violation::invalid_url(format!("invalid URL: {}", other)),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Violation::invalid_url("URL scheme not permitted"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Violation::invalid_url("URL host invalid"));
    }
    if url.as_str().chars().count() > MAX_URL_LENGTH {
        return Err(Violation::invalid_url(format!(
            "ensure this value has at most {} characters",
            MAX_URL_LENGTH
        )));
    }

    Ok(url)
}
