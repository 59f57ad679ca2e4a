//! Inventory API - A token-guarded inventory CRUD service
//!
//! Serves the item endpoints over HTTP, backed by SQLite with an in-memory
//! read-through cache.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_api::auth::Hs256Validator;
use inventory_api::cache::MemoryCache;
use inventory_api::storage::SqliteRepository;
use inventory_api::{create_router, spawn_cleanup_task, AppState, Config, InventoryService};

/// Main entry point for the inventory API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the item database and create the item cache
/// 4. Start background cache cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Inventory API");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: port={}, database={}, cache_ttl={}s, cache_max_entries={}, cleanup_interval={}s",
        config.server_port,
        config.database_path.display(),
        config.cache_ttl,
        config.cache_max_entries,
        config.cleanup_interval
    );

    let repository = SqliteRepository::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
    info!("Storage and cache initialized");

    let cleanup_handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);

    let service = InventoryService::new(Arc::new(repository), cache)
        .with_cache_ttl(Duration::from_secs(config.cache_ttl));
    let state = AppState::new(
        service,
        Arc::new(Hs256Validator::new(config.jwt_secret.as_bytes())),
    );
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache cleanup task aborted");
}
