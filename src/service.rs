//! Inventory Service
//!
//! The four item operations and the read-through cache policy around them.
//! Storage is the source of truth; the cache is a shortcut that is filled on
//! read misses, refreshed on update and evicted on delete. Cache failures are
//! logged and otherwise ignored.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::cache::{item_key, ItemCache, ITEM_CACHE_TTL};
use crate::error::{InventoryError, Result, ValidationErrors};
use crate::models::{CreateItemRequest, InventoryItem, UpdateItemRequest};
use crate::storage::ItemRepository;

const NAME_TAKEN: &str = "inventory item with this name already exists.";

#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn ItemRepository>,
    cache: Arc<dyn ItemCache>,
    cache_ttl: Duration,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn ItemRepository>, cache: Arc<dyn ItemCache>) -> Self {
        Self {
            repository,
            cache,
            cache_ttl: ITEM_CACHE_TTL,
        }
    }

    /// Overrides the lifetime of cached item representations.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    // == Create ==
    /// Validates and persists a new item. Does not touch the cache.
    #[instrument(skip_all, fields(name = req.name.as_deref().unwrap_or_default()))]
    pub async fn create(&self, req: CreateItemRequest) -> Result<InventoryItem> {
        info!("Create requested");

        let new_item = req.validate().map_err(|errors| {
            error!("Failed to create item: {}", errors);
            InventoryError::Validation(errors)
        })?;

        match self.repository.create(new_item).await {
            Ok(item) => {
                info!(item_id = item.id, "Item created");
                Ok(item)
            }
            Err(InventoryError::DuplicateItem) => {
                warn!("Attempt to create an item that already exists");
                Err(InventoryError::DuplicateItem)
            }
            Err(e) => Err(e),
        }
    }

    // == Get ==
    /// Returns the item, preferring a live cached representation.
    #[instrument(skip(self))]
    pub async fn get(&self, item_id: i64) -> Result<InventoryItem> {
        let key = item_key(item_id);

        if let Some(item) = self.cached(&key).await {
            info!("Cache hit");
            return Ok(item);
        }

        let item = self.repository.get(item_id).await?.ok_or_else(|| {
            error!("Item not found");
            InventoryError::NotFound
        })?;

        self.store(&key, &item).await;
        info!("Cache miss, item loaded from storage and cached");
        Ok(item)
    }

    // == Update ==
    /// Applies a partial update and refreshes the cached representation.
    ///
    /// Existence is checked before the body is validated.
    #[instrument(skip(self, req))]
    pub async fn update(&self, item_id: i64, req: UpdateItemRequest) -> Result<InventoryItem> {
        info!("Update requested");

        if self.repository.get(item_id).await?.is_none() {
            error!("Item not found");
            return Err(InventoryError::NotFound);
        }

        let changes = req.validate().map_err(|errors| {
            error!("Failed to update item: {}", errors);
            InventoryError::Validation(errors)
        })?;

        let item = match self.repository.update(item_id, changes).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                error!("Item disappeared during update");
                return Err(InventoryError::NotFound);
            }
            Err(InventoryError::DuplicateItem) => {
                warn!("Rename collides with an existing item");
                return Err(ValidationErrors::single("name", NAME_TAKEN).into());
            }
            Err(e) => return Err(e),
        };

        self.store(&item_key(item_id), &item).await;
        info!("Item updated");
        Ok(item)
    }

    // == Delete ==
    /// Removes the item and evicts its cache entry, present or not.
    #[instrument(skip(self))]
    pub async fn delete(&self, item_id: i64) -> Result<()> {
        info!("Delete requested");

        if !self.repository.delete(item_id).await? {
            error!("Item not found");
            return Err(InventoryError::NotFound);
        }

        if let Err(e) = self.cache.delete(&item_key(item_id)).await {
            warn!("Failed to evict cache entry: {}", e);
        }
        info!("Item deleted");
        Ok(())
    }

    /// Reads and decodes a cached item. Undecodable entries are evicted.
    async fn cached(&self, key: &str) -> Option<InventoryItem> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache read failed, falling back to storage: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                if let Err(e) = self.cache.delete(key).await {
                    warn!("Failed to evict cache entry: {}", e);
                }
                None
            }
        }
    }

    async fn store(&self, key: &str, item: &InventoryItem) {
        let raw = match serde_json::to_string(item) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode item for cache: {}", e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, raw, self.cache_ttl).await {
            warn!("Cache write failed: {}", e);
        }
    }
}
