//! Conversions between model values and their wire text.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, Utc};

use crate::attributes::WireType;
use crate::errors::{CodecError, CodecResult};
use crate::value::{FieldRef, Value};

pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn format_rfc1123(value: &DateTime<Utc>) -> String {
    value.format(RFC1123_FORMAT).to_string()
}

pub fn format_iso8601(value: &DateTime<Utc>) -> String {
    value.format(ISO8601_FORMAT).to_string()
}

pub fn parse_rfc1123(field: &str, raw: &str) -> CodecResult<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| CodecError::coercion(field, WireType::DateTimeRfc1123, raw))
}

/// Accepts full timestamps as well as bare `yyyy-MM-dd` dates (midnight UTC).
pub fn parse_iso8601(field: &str, raw: &str) -> CodecResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(value.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CodecError::coercion(field, WireType::DateTimeIso8601, raw))
}

pub fn parse_bool(field: &str, raw: &str) -> CodecResult<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CodecError::coercion(field, WireType::Boolean, raw))
    }
}

pub fn parse_integer(field: &str, raw: &str) -> CodecResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CodecError::coercion(field, WireType::Integer, raw))
}

/// Renders a scalar value as wire text.
pub fn to_text(field: &str, wire_type: WireType, value: &FieldRef<'_>) -> CodecResult<String> {
    let text = match (wire_type, value) {
        (WireType::String, FieldRef::String(value)) => (*value).to_string(),
        (WireType::Integer, FieldRef::Integer(value)) => value.to_string(),
        (WireType::Boolean, FieldRef::Boolean(value)) => value.to_string(),
        (WireType::DateTimeRfc1123, FieldRef::DateTime(value)) => format_rfc1123(value),
        (WireType::DateTimeIso8601, FieldRef::DateTime(value)) => format_iso8601(value),
        (WireType::OpaqueJson, FieldRef::Json(value)) => serde_json::to_string(value)
            .map_err(|err| CodecError::malformed("json", err.to_string()))?,
        (WireType::Blob, FieldRef::Bytes(value)) => STANDARD.encode(value),
        (WireType::Blob, FieldRef::String(value)) => STANDARD.encode(value.as_bytes()),
        _ => return Err(CodecError::field_type(field, wire_type)),
    };
    Ok(text)
}

/// Parses wire text into a scalar value.
pub fn from_text(field: &str, wire_type: WireType, raw: &str) -> CodecResult<Value> {
    let value = match wire_type {
        WireType::String => Value::String(raw.to_string()),
        WireType::Integer => Value::Integer(parse_integer(field, raw)?),
        WireType::Boolean => Value::Boolean(parse_bool(field, raw)?),
        WireType::DateTimeRfc1123 => Value::DateTime(parse_rfc1123(field, raw)?),
        WireType::DateTimeIso8601 => Value::DateTime(parse_iso8601(field, raw)?),
        WireType::OpaqueJson => Value::Json(
            serde_json::from_str(raw)
                .map_err(|_| CodecError::coercion(field, wire_type, raw))?,
        ),
        WireType::Blob => Value::Bytes(
            STANDARD
                .decode(raw.trim())
                .map_err(|_| CodecError::coercion(field, wire_type, raw))?
                .into(),
        ),
        WireType::PrefixedMapping | WireType::Model(_) | WireType::ModelList(_) => {
            return Err(CodecError::field_type(field, wire_type));
        }
    };
    Ok(value)
}

/// One `(name, value)` pair per mapping entry, named `{prefix}{key}`.
pub fn expand_prefixed(prefix: &str, mapping: &BTreeMap<String, String>) -> Vec<(String, String)> {
    mapping
        .iter()
        .map(|(key, value)| (format!("{prefix}{key}"), value.clone()))
        .collect()
}

/// Rebuilds a mapping from every name starting with `prefix`
/// (ASCII case-insensitive); keys are the remaining suffixes.
pub fn collect_prefixed<'a, I>(prefix: &str, entries: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let prefix_len = prefix.len();
    entries
        .into_iter()
        .filter(|(name, _)| {
            name.len() > prefix_len
                && name.is_char_boundary(prefix_len)
                && name[..prefix_len].eq_ignore_ascii_case(prefix)
        })
        .map(|(name, value)| (name[prefix_len..].to_string(), value.to_string()))
        .collect()
}
