//! CLI entry point for the booksearch tool.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use booksearch_core::{
    DEFAULT_CATALOG_URL, DEFAULT_PAGE_SIZE, HttpFetcher, HttpFetcherConfig, LanguageCode,
    QueryBuilder, RouteConnectivity, SearchController, SearchPreferences, SharedPreferences,
    fetcher::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS},
};
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;
mod output;

use app_config::{FileConfig, load_default_file_config};
use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let loaded = load_default_file_config()?;
    let file_config = loaded.config.clone().unwrap_or_default();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .verbosity
                .map_or("info", app_config::VerbositySetting::log_level),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    match (&loaded.path, loaded.config.is_some()) {
        (Some(path), true) => debug!(path = %path.display(), "Loaded config file"),
        (Some(path), false) => debug!(path = %path.display(), "No config file found"),
        (None, _) => debug!("No config directory resolvable"),
    }

    let preferences = resolve_preferences(&args, &file_config)?;
    let catalog_url = file_config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
    let fetcher = HttpFetcher::with_config(HttpFetcherConfig {
        connect_timeout: Duration::from_secs(
            file_config
                .connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        ),
        read_timeout: Duration::from_secs(
            file_config
                .read_timeout_secs
                .unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
        ),
    })?;

    let controller = SearchController::with_query_builder(
        Arc::new(fetcher),
        Arc::new(SharedPreferences::new(preferences)),
        Arc::new(RouteConnectivity::for_catalog_url(&catalog_url)),
        QueryBuilder::with_base_url(catalog_url),
    );
    let mut updates = controller.subscribe();

    let query_text = args.query_text();
    info!(query = %query_text, pages = args.pages, "Searching catalog");
    controller.start_search(&query_text).finished().await;

    let mut printed = 0;
    let mut pages_loaded: u8 = 1;
    loop {
        let snapshot = updates.borrow_and_update().clone();
        printed = output::print_new_books(&snapshot, printed, args.json)?;
        if snapshot.status.failure().is_some() || pages_loaded >= args.pages {
            break;
        }
        let Some(ticket) = controller.load_more() else {
            debug!(printed, "No further pages available");
            break;
        };
        ticket.finished().await;
        pages_loaded += 1;
    }

    let snapshot = controller.snapshot();
    if let Some(failure) = snapshot.status.failure() {
        eprintln!("{}", output::failure_guidance(failure));
        return Ok(ExitCode::FAILURE);
    }

    info!(
        shown = snapshot.results.len(),
        total = snapshot.reported_total,
        pages = pages_loaded,
        "Search complete"
    );
    if !args.json && !args.quiet {
        println!("{}", output::summary_line(&snapshot));
    }
    Ok(ExitCode::SUCCESS)
}

/// Merges CLI flags over config values over built-in defaults.
fn resolve_preferences(args: &Args, file_config: &FileConfig) -> Result<SearchPreferences> {
    let language = match args.lang.as_deref() {
        Some(code) => Some(
            LanguageCode::new(code).with_context(|| format!("Invalid --lang value '{code}'"))?,
        ),
        None => file_config.language.clone(),
    };
    Ok(SearchPreferences::new(
        args.order
            .map(Into::into)
            .or(file_config.sort_order)
            .unwrap_or_default(),
        args.page_size
            .or(file_config.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE),
        language,
    ))
}
