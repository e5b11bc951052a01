//! Search status values and the published session view.

use std::sync::Arc;

use thiserror::Error;

use crate::book::Book;

/// Why a search or page request ended without results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// Search text was blank; nothing was sent.
    #[error("search text is empty")]
    InvalidQuery,

    /// No network path was available when the request was about to start.
    #[error("no network connection available")]
    NoConnectivity,

    /// The request failed at the connection level (DNS, timeout, reset).
    #[error("network error while contacting the catalog")]
    NetworkError,

    /// The catalog answered with a status other than 200.
    #[error("catalog responded with HTTP {0}")]
    HttpStatus(u16),

    /// The catalog response could not be decoded.
    #[error("catalog response could not be read")]
    DataError,
}

/// Lifecycle state of the live search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search has been started, or the session was reset.
    #[default]
    Idle,
    /// A first page or a further page is being fetched.
    Loading,
    /// The last request for the current search succeeded.
    Success,
    /// The last request for the current search failed.
    Failed(SearchFailure),
}

impl SearchStatus {
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn failure(self) -> Option<SearchFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Immutable view of the session, published on every accepted change.
///
/// `results` is shared, never mutated in place: a later page or a new search
/// publishes a new snapshot instead. Readers must re-read on each
/// notification rather than keeping results across a search restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Identifies the search this view belongs to.
    pub generation: u64,
    pub query_text: String,
    pub status: SearchStatus,
    /// Accumulated results in page arrival order.
    pub results: Arc<Vec<Book>>,
    /// Total matches reported by the catalog for this search.
    pub reported_total: u64,
    /// Whether requesting another page could yield more results.
    pub more_available: bool,
}
