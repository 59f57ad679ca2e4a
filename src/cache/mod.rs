//! Cache Module
//!
//! Key-value cache placed in front of item reads. The service talks to it
//! through the [`ItemCache`] trait; [`MemoryCache`] is the in-process
//! implementation with per-entry TTL and bounded capacity.

mod entry;
mod stats;
mod store;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{CacheEntry, MAX_ENTRY_TTL};
pub use stats::CacheStats;
pub use store::MemoryCache;

// == Public Constants ==
/// Lifetime of a cached item representation.
pub const ITEM_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Cache key under which an item's representation is stored.
pub fn item_key(item_id: i64) -> String {
    format!("inventory_item_{}", item_id)
}

// == Item Cache ==
/// Time-bounded key-value cache holding serialized item representations.
///
/// The cache never owns truth: callers treat every error as a miss.
#[async_trait]
pub trait ItemCache: Send + Sync {
    /// Returns the live value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
