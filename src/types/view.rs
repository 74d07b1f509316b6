//! Derived result view.

use serde::Serialize;

/// One page of search results plus the facts the UI renders around it.
///
/// Always derived from source data, filters and page; never a source of
/// truth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView<T> {
    /// Items on the current page, in sorted order.
    pub items: Vec<T>,
    /// Number of items matching the filters, before pagination.
    pub total: usize,
    /// Whether a further page exists.
    pub has_more: bool,
    /// Query completions drawn from the full source collection.
    pub suggestions: Vec<String>,
}

impl<T> ResultView<T> {
    /// An empty view: no items, no suggestions.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            has_more: false,
            suggestions: Vec::new(),
        }
    }

    /// Whether no item matched the filters.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl<T> Default for ResultView<T> {
    fn default() -> Self {
        Self::empty()
    }
}
