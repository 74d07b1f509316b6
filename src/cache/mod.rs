//! Caching subsystem.
//!
//! - [`MemoryCache`]: generic bounded TTL store with FIFO eviction. Hosts
//!   create one and share it via `Arc`; every holder of the handle shares the
//!   same capacity budget and key space, with last-write-wins semantics.
//!
//! - [`key::cache_key()`]: canonical key encoding used by
//!   [`MemoizedSearch`](crate::MemoizedSearch) so distinct dependency lists
//!   never share a bucket.

pub mod key;
pub mod memory;

pub use key::{SEARCH_NAMESPACE, cache_key};
pub use memory::{CacheConfig, MemoryCache};
