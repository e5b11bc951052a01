//! Catalog query construction.
//!
//! [`QueryBuilder`] turns search text and a preferences snapshot into a
//! [`RequestDescriptor`]. Building is pure: no I/O and no shared state, so
//! identical inputs always produce identical descriptors.
//!
//! # Example
//!
//! ```
//! use booksearch_core::preferences::SearchPreferences;
//! use booksearch_core::query::QueryBuilder;
//!
//! let builder = QueryBuilder::new();
//! let request = builder.build("rust programming", &SearchPreferences::default(), 0).unwrap();
//! assert_eq!(request.param("q"), Some("rust%20programming"));
//! ```

mod error;

pub use error::QueryError;

use crate::preferences::SearchPreferences;

/// Google Books volumes search endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// A fully formed catalog search request.
///
/// Parameter values are stored already percent-encoded, in the order they
/// appear in the request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    base_url: String,
    params: Vec<(&'static str, String)>,
    start_index: u32,
    page_size: u8,
}

impl RequestDescriptor {
    /// Full request URL including the query string.
    #[must_use]
    pub fn url(&self) -> String {
        let query = self
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.base_url)
    }

    /// Returns the encoded value of a query parameter, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn start_index(&self) -> u32 {
        self.start_index
    }

    /// The clamped `maxResults` value carried by this request.
    #[must_use]
    pub fn page_size(&self) -> u8 {
        self.page_size
    }
}

/// Builds catalog requests against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    /// Creates a builder targeting the public Google Books endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_CATALOG_URL)
    }

    /// Creates a builder with a custom endpoint (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('?').to_string();
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the request for one page of results.
    ///
    /// `start_index` is 0 for a fresh search and the number of results already
    /// held when fetching a further page.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`] when `query_text` is blank.
    pub fn build(
        &self,
        query_text: &str,
        preferences: &SearchPreferences,
        start_index: u32,
    ) -> Result<RequestDescriptor, QueryError> {
        let text = query_text.trim();
        if text.is_empty() {
            return Err(QueryError::blank(query_text));
        }

        let page_size = preferences.effective_page_size();
        let mut params = vec![
            ("q", urlencoding::encode(text).into_owned()),
            ("maxResults", page_size.to_string()),
            ("startIndex", start_index.to_string()),
            ("orderBy", preferences.sort_order.as_str().to_string()),
        ];
        if let Some(language) = &preferences.language {
            params.push((
                "langRestrict",
                urlencoding::encode(language.as_str()).into_owned(),
            ));
        }

        Ok(RequestDescriptor {
            base_url: self.base_url.clone(),
            params,
            start_index,
            page_size,
        })
    }
}
