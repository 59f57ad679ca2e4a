//! Inventory Item Module
//!
//! The single persisted entity and the validated inputs used to create or
//! change it.

use serde::{Deserialize, Serialize};

/// Maximum length of an item name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

// == Inventory Item ==
/// A stored inventory item. `name` is unique across all items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Storage-assigned identifier
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl InventoryItem {
    /// Applies a partial change set in place.
    pub fn apply(&mut self, changes: ItemChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
    }
}

// == New Item ==
/// Validated fields for a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
}

// == Item Changes ==
/// Validated partial update. `None` leaves a field untouched;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}
