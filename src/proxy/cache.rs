//! Cache-or-fetch policy shared by every proxied read route.

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::cache::SharedStore;
use crate::error::{GatewayError, Result};
use crate::models::CacheInfo;

// == Cached ==
/// A route result tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    /// `true` when served from the store, `false` after a fresh upstream fetch
    pub cached: bool,
}

// == Proxy Cache ==
/// Wraps upstream fetches with the shared store.
///
/// Concurrent misses on the same key are not coalesced: each one runs its own
/// fetch and the last to finish overwrites the entry.
#[derive(Debug, Clone)]
pub struct ProxyCache {
    store: SharedStore,
}

impl ProxyCache {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // == Get Or Fetch ==
    /// Serves `key` from the store, or runs `fetch` and stores its result with
    /// the default TTL.
    ///
    /// The store lock is released while `fetch` runs. A failed fetch is
    /// returned as-is and leaves the key absent.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> Result<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let hit = self.store.write().await.get(key);
        if let Some(stored) = hit {
            debug!(key, "Cache hit");
            let value = serde_json::from_value(stored).map_err(|e| {
                GatewayError::Internal(format!("Cached value for '{}' is unreadable: {}", key, e))
            })?;
            return Ok(Cached {
                value,
                cached: true,
            });
        }

        debug!(key, "Cache miss, fetching from upstream");
        let value = fetch().await?;

        let stored = serde_json::to_value(&value).map_err(|e| {
            GatewayError::Internal(format!("Failed to cache value for '{}': {}", key, e))
        })?;
        self.store.write().await.set(key, stored, None);

        Ok(Cached {
            value,
            cached: false,
        })
    }

    // == Clear ==
    /// Deletes one key, or flushes everything when `key` is `None`.
    /// Deleting an absent key is not an error.
    pub async fn clear(&self, key: Option<&str>) {
        let mut store = self.store.write().await;
        match key {
            Some(key) => {
                let removed = store.delete(key);
                info!(key, removed, "Cache key cleared");
            }
            None => {
                let removed = store.flush_all();
                info!(removed, "Cache flushed");
            }
        }
    }

    // == Info ==
    pub async fn info(&self) -> CacheInfo {
        let store = self.store.read().await;
        let keys = store.keys();
        CacheInfo {
            count: keys.len(),
            stats: store.stats(),
            keys,
        }
    }
}
