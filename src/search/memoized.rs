//! Memoized term search.
//!
//! [`MemoizedSearch`] filters a source collection by a single (already
//! debounced) search term and caches the result in a shared
//! [`MemoryCache`], keyed on the term plus a caller-supplied dependency
//! list. The dependency list carries every other facet the predicate looks
//! at; leaving a facet out means results computed under different facet
//! values share a cache bucket.
//!
//! Cached results are `Arc<[T]>`, so a hit hands back the very allocation
//! the miss produced.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::cache::{MemoryCache, SEARCH_NAMESPACE, cache_key};
use crate::traits::TermPredicate;

/// Default time-to-live for memoized results.
pub const DEFAULT_MEMO_TTL: Duration = Duration::from_secs(2 * 60);

/// Term search with results cached in a shared [`MemoryCache`].
pub struct MemoizedSearch<T> {
    cache: Arc<MemoryCache<Arc<[T]>>>,
    namespace: String,
    ttl: Duration,
}

impl<T: Clone> MemoizedSearch<T> {
    /// Create a memoized search over a shared cache, with the default
    /// namespace and a 2 minute TTL.
    pub fn new(cache: Arc<MemoryCache<Arc<[T]>>>) -> Self {
        Self {
            cache,
            namespace: SEARCH_NAMESPACE.to_string(),
            ttl: DEFAULT_MEMO_TTL,
        }
    }

    /// Set the time-to-live for cached results.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Use a different key namespace, isolating this search from others on
    /// the same cache.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// The shared cache handle.
    pub fn cache(&self) -> &Arc<MemoryCache<Arc<[T]>>> {
        &self.cache
    }

    /// Filter `data` by `term`, consulting the cache first.
    ///
    /// An empty or whitespace-only term bypasses the cache and returns the
    /// whole collection. Errors only if `deps` cannot be encoded as JSON.
    pub fn search<P, D>(
        &self,
        data: &Arc<[T]>,
        term: &str,
        predicate: &P,
        deps: &D,
    ) -> Result<Arc<[T]>>
    where
        P: TermPredicate<T>,
        D: Serialize + ?Sized,
    {
        if term.trim().is_empty() {
            return Ok(Arc::clone(data));
        }

        let key = cache_key(&self.namespace, term, deps)?;
        if let Some(cached) = self.cache.get(&key) {
            debug!(term, "memoized search hit");
            return Ok(cached);
        }

        let results: Arc<[T]> = data
            .iter()
            .filter(|item| predicate.matches_term(item, term))
            .cloned()
            .collect();
        debug!(term, matched = results.len(), "memoized search miss");
        self.cache
            .insert_with_ttl(key, Arc::clone(&results), self.ttl);
        Ok(results)
    }
}
