//! Response DTOs for the inventory API
//!
//! Items are returned as `InventoryItem` directly; this module holds the
//! remaining bodies.

use serde::Serialize;

/// Plain-text body of `GET /`.
pub const BANNER: &str = "Inventory Management API is running.";

/// Response body for DELETE /items/:item_id/
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Item deleted successfully.".to_string(),
        }
    }
}

/// Error response body for single-message error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
