//! Book records produced by the catalog parser.

use serde::Serialize;
use url::Url;

/// A single catalog result.
///
/// `title` and `author` are always present (empty when the catalog omits
/// them). Links are optional: a missing thumbnail means the front end should
/// draw a placeholder, and a missing info page means navigation is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    title: String,
    author: String,
    published_year: String,
    thumbnail: Option<Url>,
    info_page: Option<Url>,
}

impl Book {
    /// Creates a new book record.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        published_year: impl Into<String>,
        thumbnail: Option<Url>,
        info_page: Option<Url>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_year: published_year.into(),
            thumbnail,
            info_page,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn published_year(&self) -> &str {
        &self.published_year
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&Url> {
        self.thumbnail.as_ref()
    }

    /// Page with more information about the book, usually on Google Books.
    #[must_use]
    pub fn info_page(&self) -> Option<&Url> {
        self.info_page.as_ref()
    }

    /// Whether a thumbnail image can be loaded for this record.
    #[must_use]
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}
