//! API Handlers
//!
//! HTTP request handlers for each inventory endpoint. They extract and
//! decode the request, then delegate to [`InventoryService`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::{Hs256Validator, TokenValidator};
use crate::cache::ItemCache;
use crate::error::{InventoryError, Result};
use crate::models::{
    CreateItemRequest, DeleteResponse, InventoryItem, UpdateItemRequest, BANNER,
};
use crate::service::InventoryService;
use crate::storage::ItemRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: InventoryService,
    pub validator: Arc<dyn TokenValidator>,
}

impl AppState {
    pub fn new(service: InventoryService, validator: Arc<dyn TokenValidator>) -> Self {
        Self { service, validator }
    }

    /// Wires storage and cache into a service guarded by an HS256 validator.
    pub fn with_backends(
        repository: Arc<dyn ItemRepository>,
        cache: Arc<dyn ItemCache>,
        jwt_secret: &[u8],
    ) -> Self {
        Self::new(
            InventoryService::new(repository, cache),
            Arc::new(Hs256Validator::new(jwt_secret)),
        )
    }
}

/// Route ids that are not plain digit strings name no item.
fn parse_item_id(raw: &str) -> Result<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InventoryError::NotFound);
    }
    raw.parse().map_err(|_| InventoryError::NotFound)
}

/// Handler for GET /
pub async fn banner_handler() -> &'static str {
    BANNER
}

/// Handler for POST /items/
pub async fn create_item_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InventoryItem>)> {
    let Json(req) = payload?;
    let item = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /items/:item_id/
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<InventoryItem>> {
    let item_id = parse_item_id(&item_id)?;
    Ok(Json(state.service.get(item_id).await?))
}

/// Handler for PUT /items/:item_id/
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    payload: std::result::Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<InventoryItem>> {
    let item_id = parse_item_id(&item_id)?;
    let Json(req) = payload?;
    Ok(Json(state.service.update(item_id, req).await?))
}

/// Handler for DELETE /items/:item_id/
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let item_id = parse_item_id(&item_id)?;
    state.service.delete(item_id).await?;
    Ok(Json(DeleteResponse::deleted()))
}
