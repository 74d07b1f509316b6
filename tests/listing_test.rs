//! Tests for the storefront listing collaborators driving a real engine.

use std::io::Write;

use catalog_search::listing::{self, Listing, load_listings};
use catalog_search::{FilterUpdate, PriceRange, SearchEngine, SearchError, SortKey};

fn catalog() -> Vec<Listing> {
    load_listings(concat!(env!("CARGO_MANIFEST_DIR"), "/data/listings.json")).unwrap()
}

fn ids(items: &[Listing]) -> Vec<&str> {
    items.iter().map(|l| l.id.as_str()).collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn bundled_catalog_loads() {
    let listings = catalog();
    assert_eq!(listings.len(), 8);
    assert!(listings.iter().all(|l| l.region().is_some()));
}

#[test]
fn malformed_file_is_a_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[{{\"id\": 1}}]").unwrap();

    let err = load_listings(file.path()).unwrap_err();
    assert!(matches!(err, SearchError::Json(_)));
    assert!(!err.is_input_error());
}

// ============================================================================
// Engine integration
// ============================================================================

#[test]
fn featured_sort_puts_featured_first() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    let items = &engine.results().items;
    assert_eq!(ids(&items[..2]), ["pq-001", "dn-001"]);
    assert!(items[2..].iter().all(|l| !l.featured));
}

#[test]
fn unrecognised_sort_key_puts_featured_first() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    engine.update_filters(FilterUpdate::new().sort_by(SortKey::Custom("bogus".into())));
    assert_eq!(ids(&engine.results().items), [
        "pq-001", "dn-001", "pq-002", "hn-001", "ql-001", "dl-001", "hcm-001", "vt-001"
    ]);
}

#[test]
fn name_sort_ignores_accents_on_the_first_pass() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    let update = engine.filters().property_type_toggled("villa", true);
    engine.update_filters(update.sort_by(SortKey::Name));
    let titles: Vec<&str> = engine.results().items.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["Villa Bãi Sau", "Villa Biển Bãi Trường"]);
}

#[test]
fn whitespace_query_is_matched_literally() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    engine.update_filters(FilterUpdate::new().query("   "));
    engine.settle_query();
    assert_eq!(engine.results().total, 0);
}

#[test]
fn newest_sort_puts_undated_last() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    engine.update_filters(FilterUpdate::new().sort_by(SortKey::Newest));
    let items = &engine.results().items;
    assert_eq!(ids(items), [
        "hcm-001", "pq-001", "dn-001", "pq-002", "dl-001", "hn-001", "ql-001", "vt-001"
    ]);
}

#[test]
fn combined_facets_narrow_results() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    let filters = engine.filters().clone();
    engine.update_filters(filters.category_toggled("Miền Trung", true));
    engine.update_filters(
        FilterUpdate::new()
            .price_range(PriceRange::new(1.0, 2.0).unwrap())
            .min_rating(4.5)
            .sort_by(SortKey::Rating),
    );

    assert_eq!(ids(&engine.results().items), ["dl-001", "dn-001"]);
}

#[test]
fn toggling_tags_adds_and_removes() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    let update = engine.filters().tag_toggled("Lò sưởi");
    engine.update_filters(update);
    assert_eq!(ids(&engine.results().items), ["dl-001"]);

    let update = engine.filters().tag_toggled("Lò sưởi");
    engine.update_filters(update);
    assert_eq!(engine.results().total, 8);
}

#[test]
fn property_type_and_location_slug() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare);
    let update = engine.filters().property_type_toggled("villa", true);
    engine.update_filters(update.location("mien-nam"));
    assert_eq!(ids(&engine.results().items), ["vt-001"]);
}

#[test]
fn suggestions_follow_the_settled_query() {
    let mut engine = SearchEngine::new(catalog(), listing::matches, listing::compare)
        .with_suggestions(listing::suggestions)
        .with_suggestion_limit(2);
    engine.update_filters(FilterUpdate::new().query("gần biển"));
    assert!(engine.results().suggestions.is_empty());

    engine.settle_query();
    let view = engine.results();
    assert_eq!(view.suggestions, ["Gần biển"]);
    assert_eq!(view.total, 4);
}
