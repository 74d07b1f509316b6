//! Synchronous search engine core.
//!
//! [`SearchEngine`] owns the filter state and page cursor for one fixed
//! source collection and derives [`ResultView`]s from them. It holds no
//! timers: the query the predicate sees is the *debounced* query, which the
//! host (or [`SearchSession`](crate::SearchSession)) feeds in through
//! [`set_debounced_query()`](SearchEngine::set_debounced_query).
//!
//! # Memoization
//!
//! [`results()`](SearchEngine::results) caches the last view together with
//! the inputs it was computed from (effective filters and page). A call
//! only recomputes when those inputs differ, so typing into the search box
//! does not trigger any work until the debounced query moves.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexSet;
use tracing::debug;

use crate::config::{DEFAULT_PAGE_SIZE, DEFAULT_SUGGESTION_LIMIT, SearchConfig};
use crate::telemetry;
use crate::traits::{NoSuggestions, SearchPredicate, SortComparator, SuggestionExtractor};
use crate::types::{FilterUpdate, ResultView, SearchFilters};

/// Inputs a cached view was derived from.
struct Memo<T> {
    filters: SearchFilters,
    page: usize,
    view: ResultView<T>,
}

/// Filter, sort and paginate engine over an immutable source collection.
///
/// Replacing the source collection means building a new engine.
pub struct SearchEngine<T, P, C, S = NoSuggestions> {
    source: Arc<[T]>,
    predicate: P,
    comparator: C,
    suggestions: S,
    filters: SearchFilters,
    debounced_query: String,
    page: usize,
    page_size: usize,
    suggestion_limit: usize,
    memo: Option<Memo<T>>,
    recomputations: u64,
}

impl<T, P, C> SearchEngine<T, P, C, NoSuggestions>
where
    T: Clone,
    P: SearchPredicate<T>,
    C: SortComparator<T>,
{
    /// Create an engine with default filters, page size 12 and no
    /// suggestions.
    pub fn new(source: impl Into<Arc<[T]>>, predicate: P, comparator: C) -> Self {
        Self {
            source: source.into(),
            predicate,
            comparator,
            suggestions: NoSuggestions,
            filters: SearchFilters::default(),
            debounced_query: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            memo: None,
            recomputations: 0,
        }
    }
}

impl<T, P, C, S> SearchEngine<T, P, C, S>
where
    T: Clone,
    P: SearchPredicate<T>,
    C: SortComparator<T>,
    S: SuggestionExtractor<T>,
{
    /// Replace the suggestion extractor.
    pub fn with_suggestions<S2>(self, suggestions: S2) -> SearchEngine<T, P, C, S2>
    where
        S2: SuggestionExtractor<T>,
    {
        SearchEngine {
            source: self.source,
            predicate: self.predicate,
            comparator: self.comparator,
            suggestions,
            filters: self.filters,
            debounced_query: self.debounced_query,
            page: self.page,
            page_size: self.page_size,
            suggestion_limit: self.suggestion_limit,
            memo: None,
            recomputations: self.recomputations,
        }
    }

    /// Set the page size. Zero is treated as one.
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.page_size = n.max(1);
        self.memo = None;
        self
    }

    /// Set the maximum number of suggestions per view.
    pub fn with_suggestion_limit(mut self, n: usize) -> Self {
        self.suggestion_limit = n;
        self.memo = None;
        self
    }

    /// Apply page size and suggestion cap from a config.
    pub fn with_config(self, config: &SearchConfig) -> Self {
        self.with_page_size(config.page_size)
            .with_suggestion_limit(config.suggestion_limit)
    }

    /// Start from the given filters instead of the defaults.
    ///
    /// The query is treated as already settled.
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.debounced_query = filters.query.clone();
        self.filters = filters;
        self.page = 1;
        self
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Current filter state, with the raw (undebounced) query.
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Query currently in effect for filtering.
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    /// Filters as the predicate sees them: the raw query replaced by the
    /// debounced one.
    pub fn effective_filters(&self) -> SearchFilters {
        self.filters.with_query(self.debounced_query.as_str())
    }

    /// Current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The source collection.
    pub fn source(&self) -> &Arc<[T]> {
        &self.source
    }

    /// Whether a search is in flight. Always `false`: computation is
    /// synchronous.
    pub fn is_loading(&self) -> bool {
        false
    }

    /// Number of times a result view has actually been computed by
    /// [`results()`](Self::results).
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Merge a partial update into the filters and go back to page 1.
    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.apply(update);
        self.page = 1;
    }

    /// Reset every filter to its default and go back to page 1.
    pub fn clear_filters(&mut self) {
        self.filters = SearchFilters::default();
        self.page = 1;
    }

    /// Advance one page if, and only if, the current view has more.
    pub fn load_more(&mut self) {
        if self.results().has_more {
            self.page += 1;
        }
    }

    /// Jump to a page. Values below 1 are clamped to 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Record a settled query. Does not touch the page cursor.
    pub fn set_debounced_query(&mut self, query: impl Into<String>) {
        self.debounced_query = query.into();
    }

    /// Make the raw query take effect immediately, skipping the debounce.
    pub fn settle_query(&mut self) {
        self.debounced_query = self.filters.query.clone();
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Current result view, recomputed only when its inputs changed.
    pub fn results(&mut self) -> &ResultView<T> {
        let filters = self.effective_filters();
        let memo = match self.memo.take() {
            Some(memo) if memo.page == self.page && memo.filters == filters => memo,
            _ => {
                let view = self.compute_with(&filters, self.page);
                self.recomputations += 1;
                metrics::counter!(telemetry::RECOMPUTATIONS_TOTAL).increment(1);
                Memo {
                    filters,
                    page: self.page,
                    view,
                }
            }
        };
        &self.memo.insert(memo).view
    }

    /// Compute the current view from scratch without touching the memo.
    pub fn compute_view(&self) -> ResultView<T> {
        self.compute_with(&self.effective_filters(), self.page)
    }

    fn compute_with(&self, filters: &SearchFilters, page: usize) -> ResultView<T> {
        let start = Instant::now();

        let mut matched: Vec<&T> = self
            .source
            .iter()
            .filter(|item| self.predicate.matches(item, filters))
            .collect();
        matched.sort_by(|a, b| self.comparator.compare(a, b, &filters.sort_by));

        let total = matched.len();
        let offset = (page - 1).saturating_mul(self.page_size);
        let end = page.saturating_mul(self.page_size);
        let items: Vec<T> = matched
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();

        let suggestions = if filters.query.is_empty() {
            Vec::new()
        } else {
            self.collect_suggestions(&filters.query)
        };

        let elapsed = start.elapsed();
        metrics::histogram!(telemetry::COMPUTE_DURATION_SECONDS).record(elapsed.as_secs_f64());
        debug!(
            total,
            page,
            page_items = items.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "computed result view"
        );

        ResultView {
            items,
            total,
            has_more: end < total,
            suggestions,
        }
    }

    fn collect_suggestions(&self, term: &str) -> Vec<String> {
        let unique: IndexSet<String> = self
            .suggestions
            .suggest(term, &self.source)
            .into_iter()
            .collect();
        unique.into_iter().take(self.suggestion_limit).collect()
    }
}
