//! Search orchestration.
//!
//! - [`SearchEngine`]: synchronous filter/sort/paginate core with a memoized
//!   result view.
//! - [`SearchSession`]: engine plus a debounced query, for interactive hosts.
//! - [`MemoizedSearch`]: term search backed by a shared
//!   [`MemoryCache`](crate::MemoryCache).

mod engine;
mod memoized;
mod session;

pub use engine::SearchEngine;
pub use memoized::{DEFAULT_MEMO_TTL, MemoizedSearch};
pub use session::SearchSession;
