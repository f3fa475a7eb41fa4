//! Cache Entry Module
//!
//! Defines a single cached upstream response with its storage time and TTL.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A transformed upstream payload held by the cache store.
///
/// Entries are never mutated in place; a refresh replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored (already transformed) payload
    pub value: Value,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Time-to-live in seconds, counted from `stored_at`
    pub ttl_seconds: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `ttl_seconds` - Lifetime in seconds; `0` yields an already-expired entry
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        Self {
            value,
            stored_at: current_timestamp_ms(),
            ttl_seconds,
        }
    }

    // == Expires At ==
    /// Unix millisecond timestamp at which the entry stops being served.
    pub fn expires_at(&self) -> u64 {
        self.stored_at
            .saturating_add(self.ttl_seconds.saturating_mul(1000))
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once its age is greater than or equal to its TTL,
    /// so it is served for ages in `[0, ttl)` only.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.stored_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
