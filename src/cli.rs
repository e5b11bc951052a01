//! CLI argument definitions using clap derive macros.

use clap::{Parser, ValueEnum};

use booksearch_core::SortOrder;

/// Search a remote book catalog from the terminal.
///
/// Words of the query are joined with single spaces and sent as one
/// free-text search. Further pages are requested with `--pages`.
#[derive(Parser, Debug)]
#[command(name = "booksearch")]
#[command(author, version, about)]
pub struct Args {
    /// Search text
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Result ordering (overrides config `sort_order`)
    #[arg(short = 'o', long, value_enum)]
    pub order: Option<OrderArg>,

    /// Results per page, 1-40 (overrides config `page_size`)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=40))]
    pub page_size: Option<u8>,

    /// Restrict results to a 2-3 letter language code (overrides config `language`)
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Number of pages to fetch, 1-20
    #[arg(short = 'p', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub pages: u8,

    /// Print one JSON object per book instead of text rows
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// The query words joined into one search string.
    #[must_use]
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// CLI spelling of the catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Relevance,
    Newest,
}

impl From<OrderArg> for SortOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Relevance => Self::Relevance,
            OrderArg::Newest => Self::Newest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_query_words_are_joined() {
        let args = Args::try_parse_from(["booksearch", "rust", "in", "action"]).unwrap();
        assert_eq!(args.query_text(), "rust in action");
        assert_eq!(args.pages, 1);
        assert_eq!(args.order, None);
        assert_eq!(args.page_size, None);
        assert!(!args.json);
    }

    #[test]
    fn test_cli_query_is_required() {
        let result = Args::try_parse_from(["booksearch"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["booksearch", "-v", "x"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["booksearch", "-vv", "x"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["booksearch", "--quiet", "x"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["booksearch", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["booksearch", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["booksearch", "--invalid-flag", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    // ==================== Preference Flags ====================

    #[test]
    fn test_cli_order_flag_maps_to_sort_order() {
        let args = Args::try_parse_from(["booksearch", "--order", "newest", "x"]).unwrap();
        assert_eq!(args.order.map(SortOrder::from), Some(SortOrder::Newest));

        let args = Args::try_parse_from(["booksearch", "-o", "relevance", "x"]).unwrap();
        assert_eq!(args.order.map(SortOrder::from), Some(SortOrder::Relevance));
    }

    #[test]
    fn test_cli_order_unknown_value_rejected() {
        let err = Args::try_parse_from(["booksearch", "--order", "oldest", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_page_size_bounds() {
        let args = Args::try_parse_from(["booksearch", "-n", "1", "x"]).unwrap();
        assert_eq!(args.page_size, Some(1));
        let args = Args::try_parse_from(["booksearch", "--page-size", "40", "x"]).unwrap();
        assert_eq!(args.page_size, Some(40));

        for rejected in ["0", "41"] {
            let err = Args::try_parse_from(["booksearch", "-n", rejected, "x"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_cli_pages_bounds() {
        let args = Args::try_parse_from(["booksearch", "--pages", "20", "x"]).unwrap();
        assert_eq!(args.pages, 20);

        let err = Args::try_parse_from(["booksearch", "--pages", "0", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let err = Args::try_parse_from(["booksearch", "--pages", "21", "x"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_lang_and_json_flags() {
        let args = Args::try_parse_from(["booksearch", "-l", "de", "--json", "x"]).unwrap();
        assert_eq!(args.lang.as_deref(), Some("de"));
        assert!(args.json);
    }
}
