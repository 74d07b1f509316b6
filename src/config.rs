//! Configuration loading.
//!
//! Configuration is optional; every field has a default. When a file is
//! used it is resolved in this order:
//! 1. Explicit path (e.g. the CLI's `--config` flag)
//! 2. `<config_dir>/catalog-search/config.toml` (e.g.
//!    `~/.config/catalog-search/config.toml` on Linux)
//!
//! With neither present, [`SearchConfig::default()`] is used.
//!
//! ```toml
//! page_size = 12
//! debounce_ms = 300
//! suggestion_limit = 5
//!
//! [cache]
//! max_entries = 100
//! ttl_ms = 120000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::cache::CacheConfig;
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::{Result, SearchError};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Default maximum number of query suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Search engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Items per page (default: 12). Fixed for an engine's lifetime.
    pub page_size: usize,
    /// Quiet period before a typed query takes effect (default: 300ms).
    #[serde(rename = "debounce_ms", deserialize_with = "deserialize_millis")]
    pub debounce: Duration,
    /// Maximum number of suggestions per result view (default: 5).
    pub suggestion_limit: usize,
    /// Memoized search cache settings.
    pub cache: CacheConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            cache: CacheConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn page_size(mut self, n: usize) -> Self {
        self.page_size = n;
        self
    }

    /// Set the debounce delay.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Set the suggestion cap.
    pub fn suggestion_limit(mut self, n: usize) -> Self {
        self.suggestion_limit = n;
        self
    }

    /// Set the cache configuration.
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Check invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SearchError::Configuration(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(SearchError::Configuration(
                "cache.max_entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SearchError::Configuration(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the standard locations.
    ///
    /// An explicit path that does not exist is an error; a missing user
    /// config file is not.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit_path)? else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            SearchError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            SearchError::Configuration(msg) => {
                SearchError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(SearchError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(dir) = dirs::config_dir() {
            let user_config = dir.join("catalog-search").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        Ok(None)
    }
}

/// Deserialize a millisecond count into a [`Duration`].
pub(crate) fn deserialize_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
