//! Catalog response parsing.
//!
//! [`parse`] turns a raw volumes-search payload into an ordered list of
//! [`Book`] records plus the total match count reported by the catalog.
//!
//! Decoding is tolerant per field: a missing or mistyped field degrades to an
//! empty string (title, author, year) or to an absent link, and the record is
//! still emitted. Items that are not JSON objects are skipped. Only a broken
//! top level (invalid JSON, not an object, no `totalItems`) fails the parse.
//!
//! # Example
//!
//! ```
//! use booksearch_core::parser::parse;
//!
//! let page = parse(r#"{"totalItems": 0}"#).unwrap();
//! assert!(page.items.is_empty());
//! assert_eq!(page.total_count, 0);
//! ```

mod error;
mod fields;

pub use error::ParseError;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::book::Book;

use fields::{decode_field, decode_or_default, link, string_list};

/// Separator placed between author names when a volume lists several.
pub const AUTHOR_SEPARATOR: &str = ", ";

/// Number of leading characters of `publishedDate` kept as the year.
const YEAR_LEN: usize = 4;

/// Rule for choosing a book's info page among the links the catalog offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoLinkPolicy {
    /// Prefer `canonicalVolumeLink`, fall back to `infoLink`.
    #[default]
    CanonicalFirst,
    /// Prefer `infoLink`, fall back to `canonicalVolumeLink`.
    InfoFirst,
}

impl InfoLinkPolicy {
    fn select(self, volume_info: &Value) -> Option<Url> {
        let canonical = || link(volume_info, "/canonicalVolumeLink");
        let info = || link(volume_info, "/infoLink");
        match self {
            Self::CanonicalFirst => canonical().or_else(info),
            Self::InfoFirst => info().or_else(canonical),
        }
    }
}

/// One decoded page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Records in catalog order.
    pub items: Vec<Book>,
    /// Total matches reported by the catalog (`totalItems`).
    pub total_count: u64,
}

/// Parses a payload using [`InfoLinkPolicy::CanonicalFirst`].
///
/// # Errors
///
/// Returns [`ParseError`] when the payload is not JSON, not an object, or has
/// no integer `totalItems` field.
pub fn parse(raw_body: &str) -> Result<ParsedPage, ParseError> {
    parse_with_policy(raw_body, InfoLinkPolicy::default())
}

/// Parses a payload with an explicit info-link policy.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_policy(
    raw_body: &str,
    link_policy: InfoLinkPolicy,
) -> Result<ParsedPage, ParseError> {
    let root: Value = serde_json::from_str(raw_body).map_err(|e| ParseError::invalid_json(&e))?;
    let Some(object) = root.as_object() else {
        return Err(ParseError::NotAnObject {
            found: json_type_name(&root),
        });
    };

    let total_count = object
        .get("totalItems")
        .and_then(Value::as_u64)
        .ok_or(ParseError::MissingTotal)?;

    let raw_items: &[Value] = match object.get("items") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => {
            warn!(
                found = json_type_name(other),
                "Catalog `items` is not an array; treating as empty"
            );
            &[]
        }
    };

    let mut items = Vec::with_capacity(raw_items.len());
    for (index, raw_item) in raw_items.iter().enumerate() {
        if !raw_item.is_object() {
            debug!(index, found = json_type_name(raw_item), "Skipping non-object catalog item");
            continue;
        }
        items.push(decode_book(raw_item, link_policy));
    }

    debug!(
        total_count,
        decoded = items.len(),
        skipped = raw_items.len() - items.len(),
        "Parsed catalog page"
    );

    Ok(ParsedPage { items, total_count })
}

fn decode_book(item: &Value, link_policy: InfoLinkPolicy) -> Book {
    let volume_info = item.get("volumeInfo").unwrap_or(&Value::Null);

    let title: String = decode_or_default(volume_info, "/title");
    let author = string_list(volume_info, "/authors").join(AUTHOR_SEPARATOR);
    let published_year: String = decode_field::<String>(volume_info, "/publishedDate")
        .map(|date| date.chars().take(YEAR_LEN).collect())
        .unwrap_or_default();
    let thumbnail = link(volume_info, "/imageLinks/thumbnail");
    let info_page = link_policy.select(volume_info);

    Book::new(title, author, published_year, thumbnail, info_page)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
