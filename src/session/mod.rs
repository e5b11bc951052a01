//! Search orchestration with supersession and page-append pagination.
//!
//! [`SearchController`] owns the single live search session. Each request
//! (first page or further page) runs build → fetch → parse on its own tokio
//! task; completions report back tagged with the generation they were issued
//! for, and the controller applies them only if that generation is still the
//! current one. Superseded work runs to completion but has no effect.
//!
//! Observers read the session through [`SessionSnapshot`]s, either by calling
//! [`SearchController::snapshot`] or by awaiting changes on the receiver from
//! [`SearchController::subscribe`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use booksearch_core::fetcher::{ConnectivityFlag, HttpFetcher};
//! use booksearch_core::preferences::SearchPreferences;
//! use booksearch_core::session::SearchController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = SearchController::new(
//!     Arc::new(HttpFetcher::new()?),
//!     Arc::new(SearchPreferences::default()),
//!     Arc::new(ConnectivityFlag::online()),
//! );
//! controller.start_search("rust programming").finished().await;
//! if let Some(ticket) = controller.load_more() {
//!     ticket.finished().await;
//! }
//! println!("{} results", controller.snapshot().results.len());
//! # Ok(())
//! # }
//! ```

mod state;
mod status;

pub use status::{SearchFailure, SearchStatus, SessionSnapshot};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::fetcher::{Connectivity, Fetcher};
use crate::parser;
use crate::preferences::PreferencesStore;
use crate::query::{QueryBuilder, RequestDescriptor};

use state::{PageOutcome, SearchSession};

/// Handle for one launched search or page request.
///
/// Dropping the ticket does not cancel anything.
#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl SearchTicket {
    fn settled(generation: u64) -> Self {
        Self {
            generation,
            task: None,
        }
    }

    fn spawned(generation: u64, task: JoinHandle<()>) -> Self {
        Self {
            generation,
            task: Some(task),
        }
    }

    /// Generation of the search this request belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a background fetch is still running for this request.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Waits until the background fetch (if any) has completed and its
    /// outcome has been applied or discarded.
    pub async fn finished(self) {
        if let Some(task) = self.task
            && let Err(error) = task.await
        {
            warn!(generation = self.generation, error = %error, "Search task did not complete");
        }
    }
}

struct Shared {
    fetcher: Arc<dyn Fetcher>,
    preferences: Arc<dyn PreferencesStore>,
    connectivity: Arc<dyn Connectivity>,
    query_builder: QueryBuilder,
    session: Mutex<SearchSession>,
    updates: watch::Sender<SessionSnapshot>,
}

impl Shared {
    fn lock_session(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, session: &SearchSession) {
        self.updates.send_replace(session.snapshot());
    }

    /// Compare-and-apply for a finished request, in one critical section.
    fn complete(&self, generation: u64, outcome: PageOutcome) {
        let mut session = self.lock_session();
        if session.apply(generation, outcome) {
            debug!(generation, status = ?session.status(), "Applied search completion");
            self.publish(&session);
        } else {
            debug!(
                generation,
                current = session.generation(),
                "Discarding completion from superseded search"
            );
        }
    }
}

/// Owns the live search session and runs its requests.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SearchController {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("base_url", &self.shared.query_builder.base_url())
            .field("session", &*self.shared.lock_session())
            .finish_non_exhaustive()
    }
}

impl SearchController {
    /// Creates a controller targeting the public catalog endpoint.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        preferences: Arc<dyn PreferencesStore>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        Self::with_query_builder(fetcher, preferences, connectivity, QueryBuilder::new())
    }

    /// Creates a controller with a custom query builder (e.g. another endpoint).
    #[must_use]
    pub fn with_query_builder(
        fetcher: Arc<dyn Fetcher>,
        preferences: Arc<dyn PreferencesStore>,
        connectivity: Arc<dyn Connectivity>,
        query_builder: QueryBuilder,
    ) -> Self {
        let session = SearchSession::new();
        let (updates, _) = watch::channel(session.snapshot());
        Self {
            shared: Arc::new(Shared {
                fetcher,
                preferences,
                connectivity,
                query_builder,
                session: Mutex::new(session),
                updates,
            }),
        }
    }

    /// Starts a new search for `text`, superseding any search in flight.
    ///
    /// Results are cleared immediately. Blank text ends in
    /// `Failed(InvalidQuery)` and a missing network in
    /// `Failed(NoConnectivity)`, both without a fetch. Must be called from
    /// within a tokio runtime.
    pub fn start_search(&self, text: &str) -> SearchTicket {
        let preferences = self.shared.preferences.snapshot();
        let request = self.shared.query_builder.build(text, &preferences, 0);
        let online = request.is_ok() && self.shared.connectivity.is_available();

        let mut session = self.shared.lock_session();
        let generation = session.begin_search(text, preferences);

        let request = match request {
            Ok(request) if online => request,
            Ok(_) => {
                info!(generation, "No network connectivity; search not sent");
                return self.settle(session, generation, SearchFailure::NoConnectivity);
            }
            Err(error) => {
                debug!(generation, error = %error, "Rejected search text");
                return self.settle(session, generation, SearchFailure::InvalidQuery);
            }
        };

        info!(
            generation,
            query = %text.trim(),
            order = %request.param("orderBy").unwrap_or_default(),
            page_size = request.page_size(),
            "Starting search"
        );
        self.shared.publish(&session);
        drop(session);

        SearchTicket::spawned(generation, self.spawn_request(generation, request))
    }

    /// Requests the next page of the current search.
    ///
    /// Returns `None` (and changes nothing) unless more results are available
    /// and the session is settled: after a success, or after a failed page
    /// request for a search that already has at least one page.
    pub fn load_more(&self) -> Option<SearchTicket> {
        let mut session = self.shared.lock_session();
        let Some(page) = session.begin_page() else {
            debug!(
                generation = session.generation(),
                status = ?session.status(),
                "Ignoring load-more request"
            );
            return None;
        };
        let generation = page.generation;

        let request = match self.shared.query_builder.build(
            &page.query_text,
            &page.preferences,
            page.start_index,
        ) {
            Ok(request) => request,
            Err(error) => {
                debug!(generation, error = %error, "Rejected page request");
                return Some(self.settle(session, generation, SearchFailure::InvalidQuery));
            }
        };
        if !self.shared.connectivity.is_available() {
            info!(generation, "No network connectivity; page request not sent");
            return Some(self.settle(session, generation, SearchFailure::NoConnectivity));
        }

        info!(generation, start_index = page.start_index, "Loading next page");
        self.shared.publish(&session);
        drop(session);

        Some(SearchTicket::spawned(
            generation,
            self.spawn_request(generation, request),
        ))
    }

    /// Clears the session back to `Idle`, superseding any request in flight.
    pub fn reset(&self) {
        let mut session = self.shared.lock_session();
        session.reset();
        debug!(generation = session.generation(), "Search session reset");
        self.shared.publish(&session);
    }

    /// Returns the current session view.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.updates.borrow().clone()
    }

    /// Subscribes to session changes; the receiver starts at the current view.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.updates.subscribe()
    }

    fn settle(
        &self,
        mut session: MutexGuard<'_, SearchSession>,
        generation: u64,
        failure: SearchFailure,
    ) -> SearchTicket {
        session.apply(generation, PageOutcome::Failed(failure));
        self.shared.publish(&session);
        SearchTicket::settled(generation)
    }

    fn spawn_request(&self, generation: u64, request: RequestDescriptor) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = fetch_page(shared.fetcher.as_ref(), &request).await;
            shared.complete(generation, outcome);
        })
    }
}

/// Fetches and decodes one page, mapping every failure to a [`SearchFailure`].
async fn fetch_page(fetcher: &dyn Fetcher, request: &RequestDescriptor) -> PageOutcome {
    let response = match fetcher.fetch(request).await {
        Ok(response) => response,
        Err(error) => {
            warn!(error = %error, "Catalog request failed");
            return PageOutcome::Failed(SearchFailure::NetworkError);
        }
    };

    if response.status != 200 {
        warn!(status = response.status, "Catalog returned non-OK status");
        return PageOutcome::Failed(SearchFailure::HttpStatus(response.status));
    }

    match parser::parse(&response.body) {
        Ok(page) => PageOutcome::Page(page),
        Err(error) => {
            warn!(error = %error, "Catalog response could not be parsed");
            PageOutcome::Failed(SearchFailure::DataError)
        }
    }
}
