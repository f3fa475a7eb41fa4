//! Cache Store Module
//!
//! Process-local, time-expiring key-value store for transformed upstream payloads.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL_SECONDS};

// == Cache Store ==
/// In-memory store with per-entry TTL and hit/miss accounting.
///
/// There is no size-based eviction: entries leave the store only by expiry,
/// `delete` or `flush_all`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
    /// TTL in seconds applied when `set` is called without one
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds for entries stored without an explicit TTL
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    /// Default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// An expired entry is removed on access and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.set_keys(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores or replaces the entry for `key`, resetting its age to zero.
    ///
    /// # Arguments
    /// * `key` - The cache key
    /// * `value` - The payload to store
    /// * `ttl` - TTL in seconds (uses the store default if None)
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Option<u64>) {
        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.into(), entry);
        self.stats.set_keys(self.entries.len());
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_keys(self.entries.len());
        removed
    }

    // == Flush All ==
    /// Removes every entry. Hit/miss counters are preserved.
    pub fn flush_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_keys(0);
        count
    }

    // == Keys ==
    /// Returns all live keys in ascending order. Expired entries are excluded
    /// even if the sweep has not removed them yet.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the live key count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_keys(self.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        self.stats.set_keys(self.entries.len());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS)
    }
}
