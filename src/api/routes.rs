//! API Routes
//!
//! Configures the Axum router with all inventory endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    banner_handler, create_item_handler, delete_item_handler, get_item_handler,
    update_item_handler, AppState,
};
use super::middleware::require_bearer;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Banner, unauthenticated
/// - `POST /items/` - Create an item
/// - `GET|PUT|DELETE /items/:item_id/` - Read, update or delete an item
///
/// # Middleware
/// - Bearer authentication on every `/items/` route
/// - CORS: Allows any origin
/// - Tracing: One span per request
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let items = Router::new()
        .route("/items/", post(create_item_handler))
        .route(
            "/items/:item_id/",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/", get(banner_handler))
        .merge(items)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
