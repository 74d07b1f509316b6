//! Catalog search - filter, sort and paginate engine for in-memory catalogs
//!
//! This crate turns a fixed collection of items plus a mutable filter state
//! into paged, sorted result views. The item type is opaque: inclusion,
//! ordering and query completion are supplied by the host through the
//! [`SearchPredicate`], [`SortComparator`] and [`SuggestionExtractor`]
//! traits (plain closures work).
//!
//! Around the synchronous [`SearchEngine`] sit:
//! - [`SearchSession`], which debounces the free-text query so bursts of
//!   keystrokes cause a single recomputation;
//! - [`MemoryCache`] and [`MemoizedSearch`], a bounded TTL store and a term
//!   search that memoizes through it;
//! - [`listing`], the storefront listing model with ready-made
//!   collaborators.
//!
//! # Example
//!
//! ```rust
//! use catalog_search::{FilterUpdate, SearchEngine, SearchFilters, SortKey};
//!
//! let prices = vec![40, 10, 50, 20, 30];
//! let in_range = |p: &i32, f: &SearchFilters| f.price_range.contains_price(f64::from(*p));
//! let by_price = |a: &i32, b: &i32, key: &SortKey| match key {
//!     SortKey::PriceHigh => b.cmp(a),
//!     _ => a.cmp(b),
//! };
//!
//! let mut engine = SearchEngine::new(prices, in_range, by_price).with_page_size(2);
//! engine.update_filters(FilterUpdate::new().sort_by(SortKey::PriceLow));
//!
//! let view = engine.results();
//! assert_eq!(view.items, [10, 20]);
//! assert_eq!(view.total, 5);
//! assert!(view.has_more);
//!
//! engine.load_more();
//! assert_eq!(engine.results().items, [30, 40]);
//! ```

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod listing;
pub mod search;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use cache::{CacheConfig, MemoryCache};
pub use config::SearchConfig;
pub use debounce::Debouncer;
pub use error::{Result, SearchError};
pub use search::{MemoizedSearch, SearchEngine, SearchSession};
pub use traits::{NoSuggestions, SearchPredicate, SortComparator, SuggestionExtractor, TermPredicate};
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    ALL_CATEGORIES, FilterUpdate, PriceRange, ResultView, SearchFilters, SortKey,
};
