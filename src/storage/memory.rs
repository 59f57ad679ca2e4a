//! In-memory item repository.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{InventoryError, Result};
use crate::models::{InventoryItem, ItemChanges, NewItem};
use crate::storage::ItemRepository;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, InventoryItem>,
    /// name -> id
    names: HashMap<String, i64>,
    last_id: i64,
}

/// Repository holding items in process memory.
///
/// Every check-and-write runs under one write lock, so the name index and
/// the rows never disagree.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    table: RwLock<Table>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemRepository for MemoryRepository {
    async fn create(&self, item: NewItem) -> Result<InventoryItem> {
        let mut table = self.table.write().await;
        if table.names.contains_key(&item.name) {
            return Err(InventoryError::DuplicateItem);
        }

        table.last_id += 1;
        let created = InventoryItem {
            id: table.last_id,
            name: item.name,
            description: item.description,
        };
        table.names.insert(created.name.clone(), created.id);
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<Option<InventoryItem>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: ItemChanges) -> Result<Option<InventoryItem>> {
        let mut guard = self.table.write().await;
        let table = &mut *guard;

        let Some(current) = table.rows.get(&id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            if table.names.get(name).is_some_and(|owner| *owner != id) {
                return Err(InventoryError::DuplicateItem);
            }
        }

        let old_name = current.name.clone();
        let mut updated = current.clone();
        updated.apply(changes);

        if updated.name != old_name {
            table.names.remove(&old_name);
            table.names.insert(updated.name.clone(), id);
        }
        table.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.remove(&id) {
            Some(removed) => {
                table.names.remove(&removed.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
