//! Storage Module
//!
//! The canonical home of inventory items. The service reaches storage only
//! through [`ItemRepository`]; name uniqueness is enforced here, atomically
//! with the write that would break it.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{InventoryItem, ItemChanges, NewItem};

pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

// == Item Repository ==
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persists a new item.
    ///
    /// Fails with `InventoryError::DuplicateItem` if the name is taken.
    async fn create(&self, item: NewItem) -> Result<InventoryItem>;

    async fn get(&self, id: i64) -> Result<Option<InventoryItem>>;

    /// Applies a partial update, returning `None` if the item does not exist.
    ///
    /// Fails with `InventoryError::DuplicateItem` if the new name belongs to
    /// another item.
    async fn update(&self, id: i64, changes: ItemChanges) -> Result<Option<InventoryItem>>;

    /// Removes an item, returning whether it existed.
    async fn delete(&self, id: i64) -> Result<bool>;
}
