//! Catalog search error types

/// Catalog search error types
///
/// The engine operations themselves (filter updates, paging, result
/// computation, cache reads and writes) are infallible. Errors arise only at
/// the edges: validating caller input, loading configuration, and encoding
/// data through `serde_json`.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    // Input errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Whether this error was caused by the caller's input rather than the
    /// environment (config files, data files).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type alias for catalog search operations
pub type Result<T> = std::result::Result<T, SearchError>;
