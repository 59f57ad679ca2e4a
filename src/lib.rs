//! Inventory API - A token-guarded inventory CRUD service
//!
//! Create, read, update and delete inventory items over HTTP, with a
//! read-through cache in front of item lookups.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use service::InventoryService;
pub use tasks::spawn_cleanup_task;
