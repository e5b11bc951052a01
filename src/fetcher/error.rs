//! Error types for the fetcher module.

use thiserror::Error;

/// Connection-level failures while fetching a catalog page.
///
/// HTTP error statuses are not transport errors; they are returned as part
/// of a normal [`super::FetchResponse`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request did not complete within the configured timeout.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The request URL.
        url: String,
    },

    /// Connection could not be established (DNS failure, refused, reset).
    #[error("connection failed fetching {url}: {reason}")]
    Connection {
        /// The request URL.
        url: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Any other network error, including failures while reading the body.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The request URL.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Classifies a reqwest error into timeout, connection or generic network failure.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_connect() {
            Self::Connection {
                url,
                reason: source.to_string(),
            }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a connection error.
    pub fn connection(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Connection {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while setting up a fetcher.
#[derive(Debug, Clone, Error)]
pub enum FetcherError {
    /// The HTTP client could not be constructed
    #[error("HTTP client construction failed: {reason}\n  Suggestion: {suggestion}")]
    ClientBuild {
        /// Why construction failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl FetcherError {
    #[must_use]
    pub fn client_build(reason: &str) -> Self {
        Self::ClientBuild {
            reason: reason.to_string(),
            suggestion: "Check proxy environment variables and TLS configuration".to_string(),
        }
    }
}
