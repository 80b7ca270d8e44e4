//! Time-bounded cache with stale fallback

use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default freshness window
pub const DEFAULT_CACHE_EXPIRY: Duration = Duration::from_secs(5 * 60);

struct CacheEntry<V> {
    payload: V,
    fetched_at: Instant,
}

/// Result of a cache lookup
pub enum Lookup<V> {
    Fresh(V),
    /// Present but older than the expiry window; kept as a fallback
    Stale(V),
    Missing,
}

/// Counts reported by [`TimedCache::stats`]
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
}

impl std::ops::Add for CacheStats {
    type Output = CacheStats;

    fn add(self, other: CacheStats) -> CacheStats {
        CacheStats {
            total: self.total + other.total,
            valid: self.valid + other.valid,
            expired: self.expired + other.expired,
        }
    }
}

/// Entries are never evicted on expiry, only replaced by a newer fetch or
/// dropped by an explicit clear.
pub struct TimedCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    expiry: Duration,
}

impl<V: Clone> TimedCache<V> {
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            expiry,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub async fn lookup(&self, key: &str) -> Lookup<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.fetched_at.elapsed() < self.expiry => {
                Lookup::Fresh(entry.payload.clone())
            }
            Some(entry) => Lookup::Stale(entry.payload.clone()),
            None => Lookup::Missing,
        }
    }

    /// Any payload for `key`, fresh or not
    pub async fn any(&self, key: &str) -> Option<V> {
        self.entries
            .read()
            .await
            .get(key)
            .map(|entry| entry.payload.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, payload: V) {
        self.entries.write().await.insert(
            key.into(),
            CacheEntry {
                payload,
                fetched_at: Instant::now(),
            },
        );
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let valid = entries
            .values()
            .filter(|e| e.fetched_at.elapsed() < self.expiry)
            .count();
        CacheStats {
            total: entries.len(),
            valid,
            expired: entries.len() - valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_goes_stale_but_stays() {
        let cache = TimedCache::new(Duration::from_secs(60));
        cache.insert("k", 1u32).await;
        assert!(matches!(cache.lookup("k").await, Lookup::Fresh(1)));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(matches!(cache.lookup("k").await, Lookup::Stale(1)));
        assert_eq!(
            cache.stats().await,
            CacheStats {
                total: 1,
                valid: 0,
                expired: 1
            }
        );

        assert!(cache.remove("k").await);
        assert!(matches!(cache.lookup("k").await, Lookup::Missing));
    }
}
