//! catalog — query a listing catalog from the command line.
//!
//! Loads a JSON array of listings, applies the given filters and prints one
//! page of results.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use catalog_search::listing::{self, Listing};
use catalog_search::{
    FilterUpdate, PriceRange, ResultView, SearchConfig, SearchEngine, SearchFilters, SortKey,
};

/// Search, filter and paginate a listing catalog.
#[derive(Parser)]
#[command(name = "catalog")]
#[command(version = catalog_search::PKG_VERSION)]
#[command(about = "Search a listing catalog")]
struct Args {
    /// Path to a JSON file holding an array of listings.
    listings: PathBuf,

    /// Path to configuration file.
    #[arg(short, long, env = "CATALOG_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Free-text query.
    #[arg(short, long)]
    query: Option<String>,

    /// Region category, e.g. "Miền Bắc" (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Minimum price, in millions.
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price, in millions.
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f64>,

    /// Region slug (e.g. "mien-nam") or location substring.
    #[arg(short, long)]
    location: Option<String>,

    /// Property type (repeatable).
    #[arg(long = "type")]
    property_types: Vec<String>,

    /// Tag (repeatable).
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Sort key: featured, price-low, price-high, rating, reviews, name, newest.
    #[arg(short, long, default_value = "featured")]
    sort: SortKey,

    /// Page to show (1-based).
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Print the result view as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn filter_update(&self) -> catalog_search::Result<FilterUpdate> {
        let mut update = FilterUpdate::new().sort_by(self.sort.clone());
        if let Some(query) = &self.query {
            update = update.query(query.clone());
        }
        if !self.categories.is_empty() {
            update = update.categories(self.categories.iter().cloned());
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let defaults = SearchFilters::default().price_range;
            update = update.price_range(PriceRange::new(
                self.min_price.unwrap_or(defaults.min()),
                self.max_price.unwrap_or(defaults.max()),
            )?);
        }
        if let Some(rating) = self.min_rating {
            update = update.min_rating(rating);
        }
        if let Some(location) = &self.location {
            update = update.location(location.clone());
        }
        if !self.property_types.is_empty() {
            update = update.property_types(self.property_types.iter().cloned());
        }
        if !self.tags.is_empty() {
            update = update.tags(self.tags.iter().cloned());
        }
        Ok(update)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SearchConfig::load(args.config.as_deref())?;
    info!(
        version = catalog_search::version_string(),
        page_size = config.page_size,
        "catalog starting"
    );

    let listings = listing::load_listings(&args.listings)?;
    let mut engine = SearchEngine::new(listings, listing::matches, listing::compare)
        .with_suggestions(listing::suggestions)
        .with_config(&config);

    engine.update_filters(args.filter_update()?);
    // No typing to wait out: the query takes effect immediately.
    engine.settle_query();
    engine.set_page(args.page);

    let page = engine.page();
    let view = engine.results();
    if args.json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print_view(view, page);
    }
    Ok(())
}

fn print_view(view: &ResultView<Listing>, page: usize) {
    for item in &view.items {
        println!(
            "{:<10} {:<40} {:<28} {:>12.0} VND  ★{:.1} ({})",
            item.id, item.title, item.location, item.price, item.rating, item.reviews
        );
    }
    if view.items.is_empty() {
        println!("(no listings on this page)");
    }
    println!();
    println!(
        "page {page}: {} of {} listings{}",
        view.items.len(),
        view.total,
        if view.has_more { ", more available" } else { "" }
    );
    if !view.suggestions.is_empty() {
        println!("suggestions: {}", view.suggestions.join(", "));
    }
}
