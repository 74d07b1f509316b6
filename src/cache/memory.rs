//! Bounded TTL memory cache.
//!
//! [`MemoryCache`] is a string-keyed store with a per-entry time-to-live and
//! a hard entry limit. It is shared by handing out `Arc<MemoryCache<V>>`;
//! there is no process-wide instance.
//!
//! # Expiry
//!
//! An entry is live while `now - inserted_at < ttl`. Expiry is lazy: an
//! expired entry stays in memory until a read touches it (and removes it),
//! until [`purge_expired()`](MemoryCache::purge_expired) runs, or until it
//! is evicted.
//!
//! # Eviction
//!
//! Eviction is FIFO by insertion order, not LRU. Inserting a new key while
//! the cache is full removes exactly one entry, the oldest inserted. Reads
//! never reorder entries, and overwriting an existing key refreshes its value
//! and timestamp in place without changing its position or evicting
//! anything.
//!
//! Time is read from `tokio::time::Instant`, so a paused tokio clock drives
//! expiry in tests.

use std::time::Duration;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;

use crate::telemetry;

/// Configuration for a [`MemoryCache`].
///
/// ```rust
/// # use catalog_search::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries. Default: 100.
    pub max_entries: usize,
    /// Time-to-live applied by [`MemoryCache::insert()`]. Default: 2 minutes.
    #[serde(rename = "ttl_ms", deserialize_with = "crate::config::deserialize_millis")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            ttl: Duration::from_secs(2 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries.
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the default time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= self.ttl
    }
}

/// Thread-safe, bounded, string-keyed cache with per-entry TTL.
pub struct MemoryCache<V> {
    entries: Mutex<IndexMap<String, CacheEntry<V>>>,
    max_entries: usize,
    default_ttl: Duration,
}

impl<V: Clone> MemoryCache<V> {
    /// Create a cache from the given configuration.
    ///
    /// A `max_entries` of zero is treated as one.
    pub fn new(config: &CacheConfig) -> Self {
        let max_entries = config.max_entries.max(1);
        Self {
            entries: Mutex::new(IndexMap::with_capacity(max_entries)),
            max_entries,
            default_ttl: config.ttl,
        }
    }

    /// Maximum number of entries this cache holds.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Time-to-live used by [`insert()`](Self::insert).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Insert (or overwrite) a value with the default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Insert (or overwrite) a value with an explicit TTL.
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
            ttl,
        };

        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get_mut(&key) {
            *existing = entry;
            return;
        }

        if entries.len() >= self.max_entries {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL).increment(1);
                debug!(key = %evicted, "evicted oldest cache entry");
            }
        }
        entries.insert(key, entry);
    }

    /// Look up a live value.
    ///
    /// Returns `None` on a miss. An expired entry counts as a miss and is
    /// removed.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            entries.shift_remove(key);
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
            debug!(key, "cache entry expired");
            return None;
        }

        metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Whether a live value exists for `key`. Same side effects as
    /// [`get()`](Self::get).
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry, returning its value whether or not it had expired.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries
            .lock()
            .shift_remove(key)
            .map(|entry| entry.value)
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Return the live value for `key`, computing and caching it on a miss.
    ///
    /// `compute` runs without the cache lock held, so it may itself use the
    /// cache. `ttl` of `None` uses the default TTL.
    pub fn get_or_insert_with<F>(&self, key: &str, ttl: Option<Duration>, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.insert_with_ttl(key, value.clone(), ttl.unwrap_or(self.default_ttl));
        value
    }
}

impl<V: Clone> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
