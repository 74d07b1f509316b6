//! Tests for [`MemoizedSearch`] over the storefront catalog.

use std::sync::Arc;
use std::time::Duration;

use catalog_search::cache::cache_key;
use catalog_search::listing::{self, Listing};
use catalog_search::{CacheConfig, MemoizedSearch, MemoryCache, PriceRange, SearchFilters};

fn catalog() -> Arc<[Listing]> {
    listing::load_listings(concat!(env!("CARGO_MANIFEST_DIR"), "/data/listings.json"))
        .unwrap()
        .into()
}

fn shared_cache() -> Arc<MemoryCache<Arc<[Listing]>>> {
    Arc::new(MemoryCache::new(&CacheConfig::default()))
}

#[test]
fn term_search_matches_listing_fields() {
    let data = catalog();
    let memo = MemoizedSearch::new(shared_cache());

    let hits = memo.search(&data, "hồ bơi", &listing::matches_term, &()).unwrap();
    let ids: Vec<_> = hits.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["pq-001", "dn-001", "hcm-001", "vt-001"]);
}

#[test]
fn repeated_search_is_served_from_cache() {
    let data = catalog();
    let cache = shared_cache();
    let memo = MemoizedSearch::new(Arc::clone(&cache));
    let filters = SearchFilters::default();
    let deps = (&filters.categories, filters.price_range);

    let first = memo.search(&data, "biển", &listing::matches_term, &deps).unwrap();
    let second = memo.search(&data, "biển", &listing::matches_term, &deps).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn changed_dependencies_miss_the_cache() {
    let data = catalog();
    let cache = shared_cache();
    let memo = MemoizedSearch::new(Arc::clone(&cache));

    let cheap = PriceRange::new(0.0, 2.0).unwrap();
    memo.search(&data, "wifi", &listing::matches_term, &[PriceRange::default()]).unwrap();
    memo.search(&data, "wifi", &listing::matches_term, &[cheap]).unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn results_live_under_the_search_namespace() {
    let data = catalog();
    let cache = shared_cache();
    let memo = MemoizedSearch::new(Arc::clone(&cache));

    memo.search(&data, "villa", &listing::matches_term, &["x"]).unwrap();
    let key = cache_key("search", "villa", &["x"]).unwrap();
    assert_eq!(cache.get(&key).map(|hits| hits.len()), Some(2));
}

#[tokio::test(start_paused = true)]
async fn custom_ttl_expires_results() {
    let data = catalog();
    let cache = shared_cache();
    let memo = MemoizedSearch::new(Arc::clone(&cache)).ttl(Duration::from_secs(5));

    let first = memo.search(&data, "resort", &listing::matches_term, &()).unwrap();
    tokio::time::advance(Duration::from_secs(5)).await;
    let second = memo.search(&data, "resort", &listing::matches_term, &()).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
}

#[test]
fn blank_term_skips_the_cache() {
    let data = catalog();
    let cache = shared_cache();
    let memo = MemoizedSearch::new(Arc::clone(&cache));

    let all = memo.search(&data, "", &listing::matches_term, &()).unwrap();
    assert_eq!(all.len(), data.len());
    assert!(cache.is_empty());
}
