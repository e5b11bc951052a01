//! Error types for catalog query construction.

use thiserror::Error;

/// Errors that can occur while building a catalog request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Search text is empty after trimming
    #[error("invalid query '{input}': {reason}\n  Suggestion: {suggestion}")]
    InvalidQuery {
        /// The rejected input
        input: String,
        /// Why the input was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl QueryError {
    /// Creates an `InvalidQuery` error for blank search text.
    #[must_use]
    pub fn blank(input: &str) -> Self {
        Self::InvalidQuery {
            input: input.to_string(),
            reason: "search text is empty".to_string(),
            suggestion: "Enter at least one non-whitespace character".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_blank_message() {
        let msg = QueryError::blank("   ").to_string();
        assert!(msg.contains("invalid query"), "should name the error: {msg}");
        assert!(msg.contains("empty"), "should give the reason: {msg}");
        assert!(msg.contains("Suggestion"), "should carry a suggestion: {msg}");
    }
}
