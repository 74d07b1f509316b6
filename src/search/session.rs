//! Debounced search session.
//!
//! [`SearchSession`] is what an interactive host drives: it wraps a
//! [`SearchEngine`] and routes the free-text query through a [`Debouncer`].
//! Non-query filter changes take effect on the next
//! [`results()`](SearchSession::results) call; query changes only take
//! effect once the typing has paused for the debounce delay.
//!
//! All mutation happens through `&mut self`, so a filter update and its page
//! reset are always observed together.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::config::SearchConfig;
use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::search::SearchEngine;
use crate::traits::{SearchPredicate, SortComparator, SuggestionExtractor};
use crate::types::{FilterUpdate, ResultView, SearchFilters};

/// A search engine with a debounced query.
pub struct SearchSession<T, P, C, S> {
    engine: SearchEngine<T, P, C, S>,
    debouncer: Debouncer<String>,
    settled: watch::Receiver<String>,
}

impl<T, P, C, S> SearchSession<T, P, C, S>
where
    T: Clone,
    P: SearchPredicate<T>,
    C: SortComparator<T>,
    S: SuggestionExtractor<T>,
{
    /// Wrap an engine with the default 300ms debounce.
    pub fn new(engine: SearchEngine<T, P, C, S>) -> Self {
        Self::with_delay(engine, DEFAULT_DEBOUNCE)
    }

    /// Wrap an engine with an explicit debounce delay.
    pub fn with_delay(engine: SearchEngine<T, P, C, S>, delay: Duration) -> Self {
        let debouncer = Debouncer::new(engine.debounced_query().to_string(), delay);
        let settled = debouncer.subscribe();
        Self {
            engine,
            debouncer,
            settled,
        }
    }

    /// Wrap an engine, taking page size, suggestion cap and debounce delay
    /// from a config.
    pub fn from_config(engine: SearchEngine<T, P, C, S>, config: &SearchConfig) -> Self {
        Self::with_delay(engine.with_config(config), config.debounce)
    }

    /// Current filter state, including the raw query as typed.
    pub fn filters(&self) -> &SearchFilters {
        self.engine.filters()
    }

    /// Query currently in effect for filtering.
    pub fn debounced_query(&self) -> &str {
        self.engine.debounced_query()
    }

    /// Current page (1-based).
    pub fn page(&self) -> usize {
        self.engine.page()
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &SearchEngine<T, P, C, S> {
        &self.engine
    }

    /// Whether a typed query is still waiting out the debounce delay.
    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Merge a partial update and go back to page 1. A query in the update
    /// restarts the debounce timer.
    ///
    /// # Panics
    ///
    /// Requires a tokio runtime context when the update carries a query.
    pub fn update_filters(&mut self, update: FilterUpdate) {
        let query = update.query.clone();
        self.engine.update_filters(update);
        if let Some(query) = query {
            self.debouncer.push(query);
        }
    }

    /// Reset filters and page. The cleared query goes through the debounce
    /// like any other query change.
    ///
    /// # Panics
    ///
    /// Requires a tokio runtime context.
    pub fn clear_filters(&mut self) {
        self.engine.clear_filters();
        self.debouncer.push(String::new());
    }

    /// Advance one page if the current view has more.
    pub fn load_more(&mut self) {
        self.sync_query();
        self.engine.load_more();
    }

    /// Jump to a page (clamped to at least 1).
    pub fn set_page(&mut self, page: usize) {
        self.engine.set_page(page);
    }

    /// Current result view, reflecting the latest settled query.
    pub fn results(&mut self) -> &ResultView<T> {
        self.sync_query();
        self.engine.results()
    }

    /// Wait for a pending query to settle, then return the view.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn settled_results(&mut self) -> &ResultView<T> {
        self.debouncer.wait().await;
        self.results()
    }

    /// Pick up a newly settled query, if any.
    fn sync_query(&mut self) {
        if self.settled.has_changed().unwrap_or(false) {
            let query = self.settled.borrow_and_update().clone();
            debug!(query = %query, "applying settled query");
            self.engine.set_debounced_query(query);
        }
    }
}
