//! Item model and the request/response bodies of the inventory API
//!
//! `item` holds the persisted entity, `requests`/`responses` the DTOs used
//! for serializing/deserializing HTTP bodies.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{InventoryItem, ItemChanges, NewItem, MAX_NAME_LENGTH};
pub use requests::{CreateItemRequest, UpdateItemRequest};
pub use responses::{DeleteResponse, ErrorResponse, BANNER};
