//! Booksearch Core Library
//!
//! This library provides the search pipeline for the booksearch tool, which
//! queries a remote book catalog by free text, accumulates matching records
//! across pages, and supersedes stale searches when a newer query arrives.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`query`] - Builds catalog request descriptors from text and preferences
//! - [`fetcher`] - HTTP fetch of a request descriptor plus connectivity probing
//! - [`parser`] - Tolerant decoding of catalog payloads into [`Book`] records
//! - [`session`] - Search controller, session state machine and snapshots
//! - [`preferences`] - Ordering, page size and language preferences

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod book;
pub mod fetcher;
pub mod parser;
pub mod preferences;
pub mod query;
pub mod session;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use book::Book;
pub use fetcher::{
    Connectivity, ConnectivityFlag, FetchResponse, Fetcher, FetcherError, HttpFetcher,
    HttpFetcherConfig, RouteConnectivity, TransportError,
};
pub use parser::{AUTHOR_SEPARATOR, InfoLinkPolicy, ParseError, ParsedPage, parse};
pub use preferences::{
    DEFAULT_PAGE_SIZE, LanguageCode, LanguageCodeError, MAX_PAGE_SIZE, PreferencesStore,
    SearchPreferences, SharedPreferences, SortOrder,
};
pub use query::{DEFAULT_CATALOG_URL, QueryBuilder, QueryError, RequestDescriptor};
pub use session::{
    SearchController, SearchFailure, SearchStatus, SearchTicket, SessionSnapshot,
};
