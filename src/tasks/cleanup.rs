//! TTL Cleanup Task
//!
//! Background sweep that removes expired cache entries, so keys that are
//! never read again do not linger until the process exits.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::SharedStore;

/// Spawns the periodic sweep over `cache`.
///
/// The first sweep runs one full period after startup. `period_secs` is
/// clamped to at least one second. The write lock is taken per sweep only.
/// The returned handle is aborted on shutdown.
pub fn spawn_cleanup_task(cache: SharedStore, period_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(period_secs.max(1));

    tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "Cache cleanup task started");

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let (removed, remaining, hit_rate) = {
                let mut store = cache.write().await;
                let removed = store.cleanup_expired();
                (removed, store.len(), store.stats().hit_rate())
            };

            if removed > 0 {
                info!(removed, remaining, hit_rate, "Expired cache entries removed");
            } else {
                debug!(remaining, hit_rate, "Cache sweep found nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared, CacheStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = shared(CacheStore::new(300));
        cache.write().await.set("campaign_1", json!("x"), Some(1));

        let handle = spawn_cleanup_task(cache.clone(), 1);

        // Wait for entry to expire and cleanup to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Removed by the sweep, without any read touching it
        assert_eq!(cache.read().await.stats().misses, 0);
        assert!(cache.read().await.keys().is_empty());
        assert_eq!(cache.write().await.cleanup_expired(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = shared(CacheStore::new(300));
        cache.write().await.set("audience_stats", json!([1]), Some(3600));

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.write().await.get("audience_stats"), Some(json!([1])));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = shared(CacheStore::new(300));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
