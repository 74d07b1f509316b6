//! Filter state for catalog searches.
//!
//! [`SearchFilters`] is the value object the engine owns. Hosts never mutate
//! it directly; they describe a change as a [`FilterUpdate`] and hand it to
//! [`SearchEngine::update_filters()`](crate::SearchEngine::update_filters),
//! which merges it and resets the page cursor in one step.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Result, SearchError};

/// Category sentinel meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "Tất cả";

/// Default lower price bound, in millions.
pub const DEFAULT_MIN_PRICE: f64 = 0.0;

/// Default upper price bound, in millions.
pub const DEFAULT_MAX_PRICE: f64 = 10_000.0;

/// Ordering applied to the filtered result set.
///
/// Serializes as a flat kebab-case string (e.g. `"price-low"`). Unknown keys
/// survive as `Custom` so hosts can carry their own comparators; the listing
/// comparator treats anything it does not recognise as `Featured`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Reviews,
    Name,
    Newest,
    /// Host-defined sort key not in the well-known set.
    Custom(String),
}

impl SortKey {
    /// Canonical string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::Name => "name",
            Self::Newest => "newest",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "featured" => Self::Featured,
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "reviews" => Self::Reviews,
            "name" => Self::Name,
            "newest" => Self::Newest,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let Ok(key) = s.parse::<SortKey>();
        Ok(key)
    }
}

/// Closed price interval `[min, max]`, expressed in millions.
///
/// Both bounds are finite and non-negative, and `min <= max`. The only way
/// to build one is [`PriceRange::new()`], so every `SearchFilters` value
/// upholds the invariant. Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Create a validated price range.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SearchError::InvalidInput(format!(
                "price range bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min < 0.0 || max < 0.0 {
            return Err(SearchError::InvalidInput(format!(
                "price range bounds must be non-negative, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(SearchError::InvalidInput(format!(
                "price range min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive), in millions.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (inclusive), in millions.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether a raw price (in base currency units) falls inside the range.
    pub fn contains_price(&self, price: f64) -> bool {
        price >= self.min * 1_000_000.0 && price <= self.max * 1_000_000.0
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl TryFrom<[f64; 2]> for PriceRange {
    type Error = SearchError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for [f64; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

/// Complete filter state for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Free-text query. The engine substitutes the debounced value before
    /// handing filters to the predicate.
    pub query: String,
    /// Selected categories. Containing [`ALL_CATEGORIES`] (or being empty)
    /// means no restriction.
    pub categories: BTreeSet<String>,
    pub price_range: PriceRange,
    pub min_rating: f64,
    /// Single location filter; empty means unrestricted.
    pub location: String,
    pub property_types: BTreeSet<String>,
    pub sort_by: SortKey,
    pub tags: BTreeSet<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: BTreeSet::from([ALL_CATEGORIES.to_string()]),
            price_range: PriceRange::default(),
            min_rating: 0.0,
            location: String::new(),
            property_types: BTreeSet::new(),
            sort_by: SortKey::default(),
            tags: BTreeSet::new(),
        }
    }
}

impl SearchFilters {
    /// Whether the category selection restricts results at all.
    pub fn all_categories(&self) -> bool {
        self.categories.is_empty() || self.categories.contains(ALL_CATEGORIES)
    }

    /// Merge a partial update into this state, field by field.
    pub fn apply(&mut self, update: FilterUpdate) {
        let FilterUpdate {
            query,
            categories,
            price_range,
            min_rating,
            location,
            property_types,
            sort_by,
            tags,
        } = update;

        if let Some(query) = query {
            self.query = query;
        }
        if let Some(categories) = categories {
            self.categories = categories;
        }
        if let Some(price_range) = price_range {
            self.price_range = price_range;
        }
        if let Some(min_rating) = min_rating {
            self.min_rating = min_rating;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(property_types) = property_types {
            self.property_types = property_types;
        }
        if let Some(sort_by) = sort_by {
            self.sort_by = sort_by;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
    }

    /// Copy of these filters with the query replaced.
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    /// Build the update produced by ticking or unticking a category box.
    ///
    /// Ticking the sentinel selects only the sentinel. Ticking a concrete
    /// category drops the sentinel. Unticking the last concrete category
    /// falls back to the sentinel, so the selection is never empty.
    pub fn category_toggled(&self, category: &str, checked: bool) -> FilterUpdate {
        let categories = if category == ALL_CATEGORIES {
            if checked {
                BTreeSet::from([ALL_CATEGORIES.to_string()])
            } else {
                BTreeSet::new()
            }
        } else {
            let mut next: BTreeSet<String> = self
                .categories
                .iter()
                .filter(|c| c.as_str() != ALL_CATEGORIES)
                .cloned()
                .collect();
            if checked {
                next.insert(category.to_string());
            } else {
                next.remove(category);
            }
            if next.is_empty() {
                next.insert(ALL_CATEGORIES.to_string());
            }
            next
        };
        FilterUpdate::new().categories(categories)
    }

    /// Build the update produced by ticking or unticking a property type.
    pub fn property_type_toggled(&self, property_type: &str, checked: bool) -> FilterUpdate {
        let mut next = self.property_types.clone();
        if checked {
            next.insert(property_type.to_string());
        } else {
            next.remove(property_type);
        }
        FilterUpdate::new().property_types(next)
    }

    /// Build the update produced by clicking a tag chip.
    pub fn tag_toggled(&self, tag: &str) -> FilterUpdate {
        let mut next = self.tags.clone();
        if !next.remove(tag) {
            next.insert(tag.to_string());
        }
        FilterUpdate::new().tags(next)
    }
}

/// Partial filter state. `None` fields leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_types: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
}

impl FilterUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw query text.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Replace the selected categories.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the price window.
    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Set the minimum rating.
    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Set the location filter; empty means any location.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Replace the selected property types.
    pub fn property_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Change the sort key.
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    /// Replace the selected tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Whether this update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
