//! CLI output formatting and display helpers.

use anyhow::Result;
use booksearch_core::{Book, SearchFailure, SessionSnapshot};

/// Placeholder shown when a book has no info page link.
pub const NO_INFO_PAGE: &str = "[no info page]";

const UNTITLED: &str = "(untitled)";
const UNKNOWN_AUTHOR: &str = "(unknown author)";

/// Returns the two display lines for one result row.
///
/// Missing fields are replaced with placeholders; the year is omitted when
/// empty.
#[must_use]
pub fn book_lines(book: &Book) -> [String; 2] {
    let title = non_empty_or(book.title(), UNTITLED);
    let author = non_empty_or(book.author(), UNKNOWN_AUTHOR);
    let headline = if book.published_year().is_empty() {
        format!("{title} - {author}")
    } else {
        format!("{title} - {author} ({})", book.published_year())
    };
    let link = book
        .info_page()
        .map_or_else(|| NO_INFO_PAGE.to_string(), ToString::to_string);
    [headline, format!("    {link}")]
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// Summary shown after the last page.
#[must_use]
pub fn summary_line(snapshot: &SessionSnapshot) -> String {
    let shown = snapshot.results.len();
    let mut line = format!(
        "Showing {shown} of {} results for \"{}\"",
        snapshot.reported_total, snapshot.query_text
    );
    if snapshot.more_available {
        line.push_str(" (more available, raise --pages)");
    }
    line
}

/// User-facing guidance for a failed search.
#[must_use]
pub fn failure_guidance(failure: SearchFailure) -> String {
    let suggestion = match failure {
        SearchFailure::InvalidQuery => "Enter some search text, e.g. booksearch rust programming",
        SearchFailure::NoConnectivity => "Check your network connection and try again",
        SearchFailure::NetworkError => "The catalog could not be reached; try again shortly",
        SearchFailure::HttpStatus(_) => {
            "The catalog rejected the request; check `base_url` in your config"
        }
        SearchFailure::DataError => "The catalog returned an unexpected response",
    };
    format!("Search failed: {failure}\n  Suggestion: {suggestion}")
}

/// Prints the books of `snapshot` past index `already_printed`.
///
/// Returns the new printed count.
pub fn print_new_books(
    snapshot: &SessionSnapshot,
    already_printed: usize,
    json: bool,
) -> Result<usize> {
    let fresh = snapshot.results.get(already_printed..).unwrap_or_default();
    for book in fresh {
        if json {
            println!("{}", serde_json::to_string(book)?);
        } else {
            for line in book_lines(book) {
                println!("{line}");
            }
        }
    }
    Ok(already_printed + fresh.len())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use booksearch_core::SearchStatus;
    use url::Url;

    use super::*;

    fn snapshot(results: Vec<Book>, total: u64, more: bool) -> SessionSnapshot {
        SessionSnapshot {
            generation: 1,
            query_text: "dune".to_string(),
            status: SearchStatus::Success,
            results: Arc::new(results),
            reported_total: total,
            more_available: more,
        }
    }

    #[test]
    fn test_book_lines_full_record() {
        let book = Book::new(
            "Dune",
            "Frank Herbert",
            "1965",
            None,
            Some(Url::parse("https://books.example/dune").unwrap()),
        );
        let [headline, link] = book_lines(&book);
        assert_eq!(headline, "Dune - Frank Herbert (1965)");
        assert_eq!(link, "    https://books.example/dune");
    }

    #[test]
    fn test_book_lines_incomplete_record_uses_placeholders() {
        let book = Book::new("", "", "", None, None);
        let [headline, link] = book_lines(&book);
        assert_eq!(headline, "(untitled) - (unknown author)");
        assert_eq!(link, format!("    {NO_INFO_PAGE}"));
    }

    #[test]
    fn test_summary_line_mentions_more_available() {
        let books = vec![Book::new("a", "b", "2001", None, None)];
        assert_eq!(
            summary_line(&snapshot(books.clone(), 1, false)),
            "Showing 1 of 1 results for \"dune\""
        );
        assert!(summary_line(&snapshot(books, 90, true)).ends_with("(more available, raise --pages)"));
    }

    #[test]
    fn test_failure_guidance_includes_reason_and_suggestion() {
        let text = failure_guidance(SearchFailure::HttpStatus(503));
        assert!(text.contains("HTTP 503"), "unexpected text: {text}");
        assert!(text.contains("Suggestion:"), "unexpected text: {text}");
    }

    #[test]
    fn test_print_new_books_counts_only_fresh_rows() {
        let books = vec![
            Book::new("a", "x", "", None, None),
            Book::new("b", "y", "", None, None),
        ];
        let snap = snapshot(books, 2, false);
        assert_eq!(print_new_books(&snap, 0, false).unwrap(), 2);
        assert_eq!(print_new_books(&snap, 2, true).unwrap(), 2);
        assert_eq!(print_new_books(&snap, 5, false).unwrap(), 5);
    }
}
