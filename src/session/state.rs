//! The search session state machine.
//!
//! [`SearchSession`] holds no I/O; the controller drives it under a lock and
//! performs fetches outside of it. Every completion carries the generation it
//! was issued for, and [`SearchSession::apply`] drops it unless that
//! generation is still current.

use std::sync::Arc;

use crate::book::Book;
use crate::parser::ParsedPage;
use crate::preferences::SearchPreferences;

use super::status::{SearchFailure, SearchStatus, SessionSnapshot};

/// Result of one fetch+parse run, as reported back to the session.
#[derive(Debug, Clone)]
pub(crate) enum PageOutcome {
    Page(ParsedPage),
    Failed(SearchFailure),
}

/// Everything needed to build the request for a further page.
#[derive(Debug, Clone)]
pub(crate) struct PageRequest {
    pub(crate) generation: u64,
    pub(crate) query_text: String,
    pub(crate) preferences: SearchPreferences,
    pub(crate) start_index: u32,
}

#[derive(Debug, Default)]
pub(crate) struct SearchSession {
    query_text: String,
    generation: u64,
    results: Arc<Vec<Book>>,
    reported_total: u64,
    status: SearchStatus,
    /// Snapshot taken when the current search started; reused for every page.
    preferences: SearchPreferences,
    /// Length of the last successful page, `None` until one arrives.
    last_page_len: Option<usize>,
}

impl SearchSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn status(&self) -> SearchStatus {
        self.status
    }

    /// Starts a new search, superseding whatever was in flight.
    pub(crate) fn begin_search(&mut self, query_text: &str, preferences: SearchPreferences) -> u64 {
        self.generation += 1;
        self.query_text = query_text.to_string();
        self.results = Arc::new(Vec::new());
        self.reported_total = 0;
        self.status = SearchStatus::Loading;
        self.preferences = preferences;
        self.last_page_len = None;
        self.generation
    }

    /// Returns the session to `Idle`, superseding whatever was in flight.
    pub(crate) fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// `true` while fewer results are held than reported and the last page was full.
    pub(crate) fn more_available(&self) -> bool {
        let page_size = usize::from(self.preferences.effective_page_size());
        (self.results.len() as u64) < self.reported_total
            && self.last_page_len.is_some_and(|len| len >= page_size)
    }

    /// Whether a further page may be requested now.
    ///
    /// Allowed after a success, and after a failed page request once at least
    /// one page of this search has arrived (a retry). Never while loading.
    pub(crate) fn can_load_more(&self) -> bool {
        let settled = match self.status {
            SearchStatus::Success => true,
            SearchStatus::Failed(_) => self.last_page_len.is_some(),
            SearchStatus::Idle | SearchStatus::Loading => false,
        };
        settled && self.more_available()
    }

    /// Moves to `Loading` for the next page, or returns `None` when not allowed.
    pub(crate) fn begin_page(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }
        self.status = SearchStatus::Loading;
        Some(PageRequest {
            generation: self.generation,
            query_text: self.query_text.clone(),
            preferences: self.preferences.clone(),
            start_index: u32::try_from(self.results.len()).unwrap_or(u32::MAX),
        })
    }

    /// Applies a completion. Returns `false` and leaves state untouched when
    /// the completion belongs to a superseded search.
    pub(crate) fn apply(&mut self, generation: u64, outcome: PageOutcome) -> bool {
        if generation != self.generation || !self.status.is_loading() {
            return false;
        }
        match outcome {
            PageOutcome::Page(page) => {
                self.last_page_len = Some(page.items.len());
                Arc::make_mut(&mut self.results).extend(page.items);
                self.reported_total = page.total_count;
                self.status = SearchStatus::Success;
            }
            PageOutcome::Failed(failure) => {
                self.status = SearchStatus::Failed(failure);
            }
        }
        true
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            query_text: self.query_text.clone(),
            status: self.status,
            results: Arc::clone(&self.results),
            reported_total: self.reported_total,
            more_available: self.more_available(),
        }
    }
}
