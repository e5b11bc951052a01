//! Field-level decode-or-default helpers.
//!
//! Each helper looks up one nested field by JSON pointer and decodes it,
//! returning a default (or `None`) when the field is missing or has the wrong
//! type. Failures stay local to the field.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Decodes the field at `pointer`, or `None` when it is absent or mistyped.
pub(crate) fn decode_field<T: DeserializeOwned>(value: &Value, pointer: &str) -> Option<T> {
    let field = value.pointer(pointer)?;
    if field.is_null() {
        return None;
    }
    T::deserialize(field).ok()
}

/// Decodes the field at `pointer`, falling back to `T::default()`.
pub(crate) fn decode_or_default<T: DeserializeOwned + Default>(value: &Value, pointer: &str) -> T {
    decode_field(value, pointer).unwrap_or_default()
}

/// Decodes an array of strings, keeping only the string entries.
pub(crate) fn string_list(value: &Value, pointer: &str) -> Vec<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Decodes an absolute URL; empty or unparsable strings count as absent.
pub(crate) fn link(value: &Value, pointer: &str) -> Option<Url> {
    let raw: String = decode_field(value, pointer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Url::parse(raw).ok()
}
