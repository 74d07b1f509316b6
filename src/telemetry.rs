//! Telemetry metric name constants.
//!
//! Centralised metric names for catalog search operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `catalog_search_`. Counters end in
//! `_total`, histograms use meaningful units (e.g. `_seconds`).

/// Total memory cache hits.
pub const CACHE_HITS_TOTAL: &str = "catalog_search_cache_hits_total";

/// Total memory cache misses, including reads of expired entries.
pub const CACHE_MISSES_TOTAL: &str = "catalog_search_cache_misses_total";

/// Total entries evicted to make room for a new insertion.
pub const CACHE_EVICTIONS_TOTAL: &str = "catalog_search_cache_evictions_total";

/// Total result view recomputations performed by the search engine.
pub const RECOMPUTATIONS_TOTAL: &str = "catalog_search_recomputations_total";

/// Time spent filtering, sorting and paginating one result view, in seconds.
pub const COMPUTE_DURATION_SECONDS: &str = "catalog_search_compute_duration_seconds";

/// Total settled values published by debouncers.
pub const DEBOUNCE_EMISSIONS_TOTAL: &str = "catalog_search_debounce_emissions_total";
