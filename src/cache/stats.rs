//! Cache Statistics Module
//!
//! Tracks hit/miss counters and the live key count for introspection.

use serde::Serialize;

// == Cache Stats ==
/// Counters reported by `GET /api/cache/info`.
///
/// `hits` and `misses` only ever grow for the lifetime of the process;
/// `keys` is the number of live entries at the time of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that returned a live value
    pub hits: u64,
    /// Number of lookups that found nothing (absent or expired)
    pub misses: u64,
    /// Current number of live entries
    pub keys: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Update Key Count ==
    pub fn set_keys(&mut self, count: usize) {
        self.keys = count;
    }
}
