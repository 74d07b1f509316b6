//! Storefront listing model and its default search collaborators.
//!
//! [`matches`], [`compare`] and [`suggestions`] plug straight into
//! [`SearchEngine`](crate::SearchEngine) through the closure impls in
//! [`traits`](crate::traits):
//!
//! ```rust
//! use catalog_search::SearchEngine;
//! use catalog_search::listing::{self, Listing};
//!
//! let listings: Vec<Listing> = Vec::new();
//! let mut engine = SearchEngine::new(listings, listing::matches, listing::compare)
//!     .with_suggestions(listing::suggestions);
//! assert_eq!(engine.results().total, 0);
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::info;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::Result;
use crate::types::{SearchFilters, SortKey};

/// A property listing as served by the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    /// Free-form location, e.g. `"Bãi Trường, Phú Quốc"`.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in VND.
    pub price: f64,
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

/// Geographic groupings used by both the category and location filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    North,
    Central,
    South,
    PhuQuoc,
}

impl Region {
    pub const ALL: [Region; 4] = [Self::North, Self::Central, Self::South, Self::PhuQuoc];

    /// Category label as shown in the filter sidebar.
    pub fn label(self) -> &'static str {
        match self {
            Self::North => "Miền Bắc",
            Self::Central => "Miền Trung",
            Self::South => "Miền Nam",
            Self::PhuQuoc => "Đảo Phú Quốc",
        }
    }

    /// Location filter value.
    pub fn slug(self) -> &'static str {
        match self {
            Self::North => "mien-bac",
            Self::Central => "mien-trung",
            Self::South => "mien-nam",
            Self::PhuQuoc => "phu-quoc",
        }
    }

    pub fn cities(self) -> &'static [&'static str] {
        match self {
            Self::North => &["Hà Nội", "Hải Phòng", "Quảng Ninh"],
            Self::Central => &["Đà Nẵng", "Huế", "Quy Nhơn", "Đà Lạt"],
            Self::South => &["TP.HCM", "Cần Thơ", "Vũng Tàu"],
            Self::PhuQuoc => &["Phú Quốc"],
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }

    /// Whether a free-form location names one of this region's cities.
    pub fn contains(self, location: &str) -> bool {
        self.cities().iter().any(|city| location.contains(city))
    }

    /// First region whose cities appear in `location`.
    pub fn of(location: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.contains(location))
    }
}

impl Listing {
    pub fn region(&self) -> Option<Region> {
        Region::of(&self.location)
    }

    /// Case-insensitive match of a lower-cased term against title, location,
    /// tags and description.
    fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Default listing predicate. Every active facet must match.
pub fn matches(listing: &Listing, filters: &SearchFilters) -> bool {
    matches_term(listing, &filters.query)
        && matches_category(listing, filters)
        && filters.price_range.contains_price(listing.price)
        && listing.rating >= filters.min_rating
        && (filters.property_types.is_empty()
            || filters.property_types.contains(&listing.property_type))
        && matches_location(listing, &filters.location)
        && (filters.tags.is_empty() || listing.tags.iter().any(|t| filters.tags.contains(t)))
}

/// Free-text part of [`matches`], usable on its own with
/// [`MemoizedSearch`](crate::MemoizedSearch).
/// The term is matched as typed, surrounding whitespace included.
pub fn matches_term(listing: &Listing, term: &str) -> bool {
    term.is_empty() || listing.mentions(&term.to_lowercase())
}

fn matches_category(listing: &Listing, filters: &SearchFilters) -> bool {
    filters.all_categories()
        || filters
            .categories
            .iter()
            .filter_map(|c| Region::from_label(c))
            .any(|region| region.contains(&listing.location))
}

fn matches_location(listing: &Listing, location: &str) -> bool {
    if location.is_empty() {
        return true;
    }
    match Region::from_slug(location) {
        Some(region) => region.contains(&listing.location),
        None => listing
            .location
            .to_lowercase()
            .contains(&location.to_lowercase()),
    }
}

/// Default listing order for a sort key. Unknown keys sort like `Featured`.
pub fn compare(a: &Listing, b: &Listing, key: &SortKey) -> Ordering {
    match key {
        SortKey::Featured | SortKey::Custom(_) => b.featured.cmp(&a.featured),
        SortKey::PriceLow => a.price.total_cmp(&b.price),
        SortKey::PriceHigh => b.price.total_cmp(&a.price),
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::Reviews => b.reviews.cmp(&a.reviews),
        SortKey::Name => compare_titles(&a.title, &b.title),
        SortKey::Newest => match (a.created_at, b.created_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Collation order for display titles.
///
/// Letters compare by base form first, so accents and case only break ties:
/// "Bãi" sorts before "Biển". Among otherwise equal titles lowercase comes
/// first, then raw code points decide.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| {
            let (la, lb) = (a.to_lowercase(), b.to_lowercase());
            la.cmp(&lb)
        })
        .then_with(|| b.cmp(a))
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Default suggestion extractor: titles, locations and tags containing the
/// term, in catalog order, without duplicates.
pub fn suggestions(term: &str, data: &[Listing]) -> Vec<String> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    let mut found = IndexSet::new();
    for listing in data {
        let candidates = [&listing.title, &listing.location]
            .into_iter()
            .chain(listing.tags.iter());
        for candidate in candidates {
            if candidate.to_lowercase().contains(&needle) {
                found.insert(candidate.clone());
            }
        }
    }
    found.into_iter().collect()
}

/// Read a JSON array of listings from disk.
pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let listings: Vec<Listing> = serde_json::from_str(&content)?;
    info!(path = %path.display(), count = listings.len(), "loaded listings");
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FilterUpdate, PriceRange};

    fn listing(id: &str, title: &str, location: &str, price_millions: f64) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            description: None,
            price: price_millions * 1_000_000.0,
            rating: 4.5,
            reviews: 10,
            property_type: "villa".to_string(),
            tags: vec!["Hồ bơi".to_string()],
            featured: false,
            created_at: None,
        }
    }

    fn filtered(update: FilterUpdate) -> SearchFilters {
        let mut filters = SearchFilters::default();
        filters.apply(update);
        filters
    }

    #[test]
    fn region_lookup() {
        assert_eq!(Region::of("Sơn Trà, Đà Nẵng"), Some(Region::Central));
        assert_eq!(Region::of("Dương Đông, Phú Quốc"), Some(Region::PhuQuoc));
        assert_eq!(Region::of("Singapore"), None);
        assert_eq!(Region::from_slug("mien-nam"), Some(Region::South));
        assert_eq!(Region::from_label("Miền Bắc"), Some(Region::North));
    }

    #[test]
    fn default_filters_match_everything_in_price_range() {
        let villa = listing("1", "Villa Biển", "Đà Nẵng", 5.0);
        assert!(matches(&villa, &SearchFilters::default()));

        let too_expensive = listing("2", "Penthouse", "Hà Nội", 20_000.0);
        assert!(!matches(&too_expensive, &SearchFilters::default()));
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let mut villa = listing("1", "Villa Biển", "Bãi Trường, Phú Quốc", 5.0);
        villa.description = Some("Gần BIỂN, view hoàng hôn".to_string());

        assert!(matches_term(&villa, "villa"));
        assert!(matches_term(&villa, "phú quốc"));
        assert!(matches_term(&villa, "hồ bơi"));
        assert!(matches_term(&villa, "hoàng hôn"));
        assert!(matches_term(&villa, ""));
        assert!(!matches_term(&villa, "  "), "whitespace is matched literally");
        assert!(!matches_term(&villa, "hà nội"));
    }

    #[test]
    fn category_filters_by_region() {
        let hanoi = listing("1", "Căn hộ", "Hoàn Kiếm, Hà Nội", 2.0);
        let hue = listing("2", "Nhà vườn", "Huế", 2.0);

        let north = filtered(FilterUpdate::new().categories(["Miền Bắc"]));
        assert!(matches(&hanoi, &north));
        assert!(!matches(&hue, &north));

        let either = filtered(FilterUpdate::new().categories(["Miền Bắc", "Miền Trung"]));
        assert!(matches(&hanoi, &either));
        assert!(matches(&hue, &either));
    }

    #[test]
    fn location_accepts_slug_or_substring() {
        let vung_tau = listing("1", "Resort", "Bãi Sau, Vũng Tàu", 3.0);

        assert!(matches(&vung_tau, &filtered(FilterUpdate::new().location("mien-nam"))));
        assert!(!matches(&vung_tau, &filtered(FilterUpdate::new().location("mien-bac"))));
        assert!(matches(&vung_tau, &filtered(FilterUpdate::new().location("bãi sau"))));
    }

    #[test]
    fn price_rating_type_and_tags() {
        let villa = listing("1", "Villa", "Đà Lạt", 3.0);

        let cheap = PriceRange::new(0.0, 2.0).unwrap();
        assert!(!matches(&villa, &filtered(FilterUpdate::new().price_range(cheap))));
        assert!(!matches(&villa, &filtered(FilterUpdate::new().min_rating(4.8))));
        assert!(!matches(&villa, &filtered(FilterUpdate::new().property_types(["apartment"]))));
        assert!(matches(&villa, &filtered(FilterUpdate::new().property_types(["villa"]))));
        assert!(matches(&villa, &filtered(FilterUpdate::new().tags(["Hồ bơi", "Wifi"]))));
        assert!(!matches(&villa, &filtered(FilterUpdate::new().tags(["Wifi"]))));
    }

    #[test]
    fn comparator_orders_by_key() {
        let mut a = listing("a", "Alpha", "Huế", 3.0);
        let mut b = listing("b", "Beta", "Huế", 1.0);
        a.created_at = NaiveDate::from_ymd_opt(2024, 1, 1);
        b.featured = true;

        assert_eq!(compare(&a, &b, &SortKey::PriceLow), Ordering::Greater);
        assert_eq!(compare(&a, &b, &SortKey::PriceHigh), Ordering::Less);
        assert_eq!(compare(&a, &b, &SortKey::Name), Ordering::Less);
        assert_eq!(compare(&a, &b, &SortKey::Featured), Ordering::Greater);
        assert_eq!(compare(&a, &b, &SortKey::Newest), Ordering::Less);
        assert_eq!(
            compare(&a, &b, &SortKey::Custom("distance".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn titles_collate_by_base_letter_before_accents() {
        let mut titles = vec![
            "Villa Biển Bãi Trường",
            "Villa Bãi Sau",
            "villa bai sau",
            "Đà Lạt",
            "Cần Thơ",
        ];
        titles.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(
            titles,
            [
                "Cần Thơ",
                "Đà Lạt",
                "villa bai sau",
                "Villa Bãi Sau",
                "Villa Biển Bãi Trường"
            ]
        );

        let a = listing("a", "Villa Biển Bãi Trường", "Phú Quốc", 1.0);
        let b = listing("b", "Villa Bãi Sau", "Vũng Tàu", 1.0);
        assert_eq!(compare(&a, &b, &SortKey::Name), Ordering::Greater);
    }

    #[test]
    fn suggestions_are_deduplicated_in_catalog_order() {
        let data = vec![
            listing("1", "Villa Phú Quốc", "Phú Quốc", 1.0),
            listing("2", "Resort Phú Quốc", "Phú Quốc", 1.0),
        ];
        assert_eq!(
            suggestions("phú", &data),
            ["Villa Phú Quốc", "Phú Quốc", "Resort Phú Quốc"]
        );
        assert!(suggestions("", &data).is_empty());
    }

    #[test]
    fn deserializes_storefront_json() {
        let json = r#"{
            "id": "pq-1",
            "title": "Villa Biển",
            "location": "Phú Quốc",
            "price": 3500000,
            "rating": 4.9,
            "reviews": 128,
            "type": "villa",
            "tags": ["Hồ bơi"],
            "featured": true,
            "createdAt": "2024-03-15"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.property_type, "villa");
        assert_eq!(listing.created_at, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(listing.description.is_none());
        assert_eq!(listing.region(), Some(Region::PhuQuoc));
    }

    #[test]
    fn load_listings_reports_missing_file() {
        let err = load_listings("/nonexistent/listings.json").unwrap_err();
        assert!(matches!(err, crate::SearchError::Io(_)));
    }
}
