//! Public types for the catalog search API.

mod filters;
mod view;

pub use filters::{
    ALL_CATEGORIES, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, FilterUpdate, PriceRange,
    SearchFilters, SortKey,
};
pub use view::ResultView;
