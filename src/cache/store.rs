//! Memory Cache Module
//!
//! In-process `ItemCache` backed by a HashMap with per-entry TTL and a
//! capacity bound.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, ItemCache};
use crate::error::Result;

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl CacheState {
    fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();
        self.stats.expirations += removed as u64;
        removed
    }

    /// Drops the live entry closest to its deadline.
    fn evict_soonest(&mut self) -> bool {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());

        match victim {
            Some(key) => {
                self.entries.remove(&key);
                self.stats.evictions += 1;
                true
            }
            None => false,
        }
    }
}

// == Memory Cache ==
/// Bounded in-memory item cache.
///
/// When a new key arrives at capacity, expired entries are purged first and
/// then the entry closest to expiry is evicted. A capacity of zero disables
/// storage entirely.
#[derive(Debug)]
pub struct MemoryCache {
    state: RwLock<CacheState>,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            max_entries,
        }
    }

    /// Removes all expired entries, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let mut state = self.state.write().await;
        let removed = state.purge_expired(Instant::now());
        state.stats.entries = state.entries.len();
        removed
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let mut stats = state.stats.clone();
        stats.entries = state.entries.len();
        stats
    }

    /// Number of stored entries, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let expired = match state.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                state.stats.hits += 1;
                return Ok(Some(value));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.entries.remove(key);
            state.stats.expirations += 1;
            state.stats.entries = state.entries.len();
        }
        state.stats.misses += 1;
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        if self.max_entries == 0 {
            return Ok(());
        }

        let mut state = self.state.write().await;

        if !state.entries.contains_key(key) && state.entries.len() >= self.max_entries {
            state.purge_expired(Instant::now());
            while state.entries.len() >= self.max_entries && state.evict_soonest() {}
        }

        state
            .entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        state.stats.entries = state.entries.len();
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.entries.remove(key);
        state.stats.entries = state.entries.len();
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(10);
        cache.set("inventory_item_1", "one".into(), HOUR).await.unwrap();

        assert_eq!(
            cache.get("inventory_item_1").await.unwrap().as_deref(),
            Some("one")
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = MemoryCache::new(10);
        assert!(cache.get("inventory_item_9999").await.unwrap().is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let cache = MemoryCache::new(10);
        cache.set("k", "old".into(), HOUR).await.unwrap();
        cache.set("k", "new".into(), HOUR).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let cache = MemoryCache::new(10);
        assert!(cache.delete("nothing").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let cache = MemoryCache::new(10);
        cache.set("k", "v".into(), HOUR).await.unwrap();
        cache.delete("k").await.unwrap();

        assert!(cache.get("k").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entry_not_served() {
        let cache = MemoryCache::new(10);
        cache
            .set("k", "v".into(), Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get("k").await.unwrap().is_none());
        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.expirations, 1);
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_entries() {
        let cache = MemoryCache::new(10);
        cache
            .set("short", "v".into(), Duration::from_millis(20))
            .await
            .unwrap();
        cache.set("long", "v".into(), HOUR).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("long").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_capacity_evicts_soonest_expiring() {
        let cache = MemoryCache::new(2);
        cache
            .set("a", "1".into(), Duration::from_secs(10))
            .await
            .unwrap();
        cache.set("b", "2".into(), HOUR).await.unwrap();
        cache.set("c", "3".into(), HOUR).await.unwrap();

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("a").await.unwrap().is_none());
        assert!(cache.get("b").await.unwrap().is_some());
        assert!(cache.get("c").await.unwrap().is_some());
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_capacity_prefers_purging_expired() {
        let cache = MemoryCache::new(2);
        cache
            .set("stale", "1".into(), Duration::from_millis(10))
            .await
            .unwrap();
        cache.set("b", "2".into(), HOUR).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        cache.set("c", "3".into(), HOUR).await.unwrap();

        let stats = cache.stats().await;
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 2);
    }

    #[tokio::test]
    async fn test_overwrite_at_capacity_does_not_evict() {
        let cache = MemoryCache::new(1);
        cache.set("k", "1".into(), HOUR).await.unwrap();
        cache.set("k", "2".into(), HOUR).await.unwrap();

        assert_eq!(cache.stats().await.evictions, 0);
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_zero_capacity_stores_nothing() {
        let cache = MemoryCache::new(0);
        cache.set("k", "v".into(), HOUR).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
    }
}
