//! Search preferences and the store that supplies them.
//!
//! Preferences are read once per search launch: the controller takes a
//! [`PreferencesStore::snapshot`] when a search starts and keeps using it for
//! every page of that search, so edits made mid-search only affect the next
//! search.

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Largest page size the catalog API accepts.
pub const MAX_PAGE_SIZE: u8 = 40;

/// Page size used when no preference is configured.
pub const DEFAULT_PAGE_SIZE: u8 = 20;

/// Result ordering requested from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    Newest,
}

impl SortOrder {
    /// Returns the `orderBy` value understood by the catalog API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "newest" => Ok(Self::Newest),
            other => Err(format!(
                "unknown sort order '{other}' (expected 'relevance' or 'newest')"
            )),
        }
    }
}

/// Errors produced when validating a language code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageCodeError {
    #[error("invalid language code '{code}': {reason}\n  Suggestion: Use an ISO 639 code such as 'en' or 'por'")]
    Invalid {
        /// The rejected input
        code: String,
        /// Why the input was rejected
        reason: &'static str,
    },
}

/// An ISO 639-1/639-2 shaped language code, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validates and normalizes a language code.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageCodeError::Invalid`] unless the input is 2 or 3 ASCII letters.
    pub fn new(code: &str) -> Result<Self, LanguageCodeError> {
        let trimmed = code.trim();
        if !(2..=3).contains(&trimmed.len()) {
            return Err(LanguageCodeError::Invalid {
                code: code.to_string(),
                reason: "expected 2 or 3 letters",
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LanguageCodeError::Invalid {
                code: code.to_string(),
                reason: "only ASCII letters are allowed",
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

/// Ordering, page size and language restriction for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPreferences {
    pub sort_order: SortOrder,
    /// Results per page; values outside `1..=40` are clamped when a request is built.
    pub page_size: u8,
    pub language: Option<LanguageCode>,
}

impl Default for SearchPreferences {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::default(),
            page_size: DEFAULT_PAGE_SIZE,
            language: None,
        }
    }
}

impl SearchPreferences {
    #[must_use]
    pub fn new(sort_order: SortOrder, page_size: u8, language: Option<LanguageCode>) -> Self {
        Self {
            sort_order,
            page_size,
            language,
        }
    }

    /// Page size as sent to the catalog, clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn effective_page_size(&self) -> u8 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Source of search preferences, consulted once per search launch.
pub trait PreferencesStore: Send + Sync {
    /// Returns the preferences in effect right now.
    fn snapshot(&self) -> SearchPreferences;
}

impl PreferencesStore for SearchPreferences {
    fn snapshot(&self) -> SearchPreferences {
        self.clone()
    }
}

/// Preferences that a settings screen can edit while searches are running.
#[derive(Debug, Default)]
pub struct SharedPreferences {
    current: RwLock<SearchPreferences>,
}

impl SharedPreferences {
    #[must_use]
    pub fn new(initial: SearchPreferences) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Replaces the stored preferences. Searches already launched keep their snapshot.
    pub fn update(&self, preferences: SearchPreferences) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = preferences;
    }
}

impl PreferencesStore for SharedPreferences {
    fn snapshot(&self) -> SearchPreferences {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
