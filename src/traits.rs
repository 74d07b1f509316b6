//! Collaborator contract for the search engine.
//!
//! The engine is generic over an opaque item type `T` and never looks inside
//! it. Inclusion, ordering and query completion are decided by the host
//! through the traits below. Each trait has a blanket implementation for the
//! matching closure signature, so plain functions and closures work without
//! wrapper types.
//!
//! Implementations must be pure: the same inputs must always give the same
//! answer, or result views stop being reproducible. A panic inside a
//! collaborator propagates to whoever asked for the result view.

use std::cmp::Ordering;

use crate::types::{SearchFilters, SortKey};

/// Decides whether an item is part of the result set.
pub trait SearchPredicate<T> {
    /// `filters.query` already holds the debounced query.
    fn matches(&self, item: &T, filters: &SearchFilters) -> bool;
}

impl<T, F> SearchPredicate<T> for F
where
    F: Fn(&T, &SearchFilters) -> bool,
{
    fn matches(&self, item: &T, filters: &SearchFilters) -> bool {
        self(item, filters)
    }
}

/// Orders two items for a given sort key.
///
/// Must be a total order. The engine sorts stably, so items that compare
/// `Equal` keep their source order.
pub trait SortComparator<T> {
    fn compare(&self, a: &T, b: &T, key: &SortKey) -> Ordering;
}

impl<T, F> SortComparator<T> for F
where
    F: Fn(&T, &T, &SortKey) -> Ordering,
{
    fn compare(&self, a: &T, b: &T, key: &SortKey) -> Ordering {
        self(a, b, key)
    }
}

/// Derives query completions from the full, unfiltered source collection.
///
/// The engine deduplicates the output and caps its length, so
/// implementations may return more than the cap.
pub trait SuggestionExtractor<T> {
    fn suggest(&self, term: &str, data: &[T]) -> Vec<String>;
}

impl<T, F> SuggestionExtractor<T> for F
where
    F: Fn(&str, &[T]) -> Vec<String>,
{
    fn suggest(&self, term: &str, data: &[T]) -> Vec<String> {
        self(term, data)
    }
}

/// Extractor that never suggests anything. The engine default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl<T> SuggestionExtractor<T> for NoSuggestions {
    fn suggest(&self, _term: &str, _data: &[T]) -> Vec<String> {
        Vec::new()
    }
}

/// Per-item predicate bound to a single search term.
///
/// Used by [`MemoizedSearch`](crate::MemoizedSearch), which caches by term
/// rather than by full filter state.
pub trait TermPredicate<T> {
    fn matches_term(&self, item: &T, term: &str) -> bool;
}

impl<T, F> TermPredicate<T> for F
where
    F: Fn(&T, &str) -> bool,
{
    fn matches_term(&self, item: &T, term: &str) -> bool {
        self(item, term)
    }
}
