//! Cache Module
//!
//! Provides the in-memory, time-expiring store behind the proxied read routes.

mod entry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL in seconds applied to every cached route unless configured otherwise
pub const DEFAULT_TTL_SECONDS: u64 = 600;

/// The store as shared between request handlers and the cleanup task.
pub type SharedStore = Arc<RwLock<CacheStore>>;

/// Wraps a store for sharing across tasks.
pub fn shared(store: CacheStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}
