//! API Module
//!
//! HTTP handlers, authentication middleware and routing for the inventory API.
//!
//! # Endpoints
//! - `GET /` - Plain-text banner (no authentication)
//! - `POST /items/` - Create an item
//! - `GET /items/:item_id/` - Retrieve an item (read-through cache)
//! - `PUT /items/:item_id/` - Partially update an item
//! - `DELETE /items/:item_id/` - Delete an item

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::require_bearer;
pub use routes::create_router;
