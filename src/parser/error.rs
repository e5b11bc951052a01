//! Error types for catalog payload parsing.

use thiserror::Error;

/// Errors that abort parsing of a whole catalog payload.
///
/// Problems inside individual items are never reported here: they degrade
/// the affected fields or skip the item instead.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Payload is not valid JSON
    #[error("catalog response is not valid JSON: {reason}")]
    InvalidJson {
        /// Decoder message
        reason: String,
    },

    /// Top-level JSON value is not an object
    #[error("catalog response is not a JSON object (found {found})")]
    NotAnObject {
        /// JSON type found instead
        found: &'static str,
    },

    /// `totalItems` is missing or not a non-negative integer
    #[error("catalog response has no usable `totalItems` field")]
    MissingTotal,
}

impl ParseError {
    #[must_use]
    pub fn invalid_json(error: &serde_json::Error) -> Self {
        Self::InvalidJson {
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_invalid_json_keeps_decoder_reason() {
        let decoder_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let msg = ParseError::invalid_json(&decoder_error).to_string();
        assert!(msg.contains("not valid JSON"), "unexpected message: {msg}");
        assert!(msg.contains("EOF"), "decoder reason should be kept: {msg}");
    }

    #[test]
    fn test_parse_error_not_an_object_names_found_type() {
        let msg = ParseError::NotAnObject { found: "array" }.to_string();
        assert!(msg.contains("array"), "unexpected message: {msg}");
    }
}
