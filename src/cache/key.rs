//! Canonical cache keys for memoized searches.
//!
//! A key is `namespace:"term":deps`, where the term is a JSON string
//! literal and `deps` is the canonical JSON encoding of the dependency list.
//! Quoting the term means a `:` inside it cannot shift the boundary between
//! term and dependencies. Going through `serde_json::Value` sorts object
//! keys, so two structurally equal dependency values always produce the same
//! key regardless of field order, while values of different JSON types
//! (`1` vs `"1"`) never collide.

use serde::Serialize;

use crate::Result;

/// Namespace used by [`MemoizedSearch`](crate::MemoizedSearch).
pub const SEARCH_NAMESPACE: &str = "search";

/// Build a cache key from a namespace, a search term and dependencies.
pub fn cache_key<D>(namespace: &str, term: &str, deps: &D) -> Result<String>
where
    D: Serialize + ?Sized,
{
    let term = serde_json::to_string(term)?;
    let deps = serde_json::to_value(deps)?;
    Ok(format!("{namespace}:{term}:{deps}"))
}
