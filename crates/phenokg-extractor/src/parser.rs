//! Decode cohort records and read loosely-typed JSON values

use crate::error::ExtractorError;
use serde_json::{Map, Value};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Cohort id reported when a record has no usable `id`
pub const UNKNOWN_COHORT: &str = "Unknown";

/// Decode a cohort record from raw bytes
///
/// A leading UTF-8 byte order mark is ignored. The top-level value must be
/// a JSON object.
pub fn parse_record(bytes: &[u8]) -> Result<Value, ExtractorError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ExtractorError::Encoding(e.to_string()))?;

    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ExtractorError::InvalidJson(
            "Expected a JSON object at the top level".to_string(),
        ));
    }
    Ok(value)
}

/// String form of a scalar JSON value
///
/// Strings are returned as-is, numbers and booleans in their JSON form,
/// `null` as the empty string.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// String form of an optional object member
pub fn field_text(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).map(value_text).unwrap_or_default()
}

/// Truthiness of an optional object member
///
/// Accepts booleans, `"true"`/`"false"` strings and numbers (non-zero is
/// true). Anything else, including absence, is false.
pub fn field_flag(object: &Map<String, Value>, key: &str) -> bool {
    match object.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// The record's `id` for diagnostics, or [`UNKNOWN_COHORT`]
pub fn cohort_hint(record: &Value) -> String {
    record
        .get("id")
        .map(value_text)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| UNKNOWN_COHORT.to_string())
}
