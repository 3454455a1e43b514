//! Product Cache server
//!
//! Serves the product catalog over HTTP with a read-through cache in front of
//! the in-memory product store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::create_router;
use product_cache::cache::{CacheStore, MemoryCacheStore, NoopCacheStore, RedisCacheStore};
use product_cache::config::{CacheBackend, Config};
use product_cache::{spawn_cleanup_task, AppState, InMemoryProductStore};

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the configured cache backend, falling back to no-op
/// 4. Wrap the product store in the product cache
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_enabled={}, backend={:?}, default_ttl={}s, port={}",
        config.cache_enabled, config.cache_backend, config.default_ttl, config.server_port
    );

    let (backend, cleanup_handle) = build_backend(&config).await;
    info!("Cache backend ready: {}", backend.backend_name());

    let state = AppState::with_cache(
        InMemoryProductStore::new(),
        backend,
        config.cache_settings(),
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

/// Selects the cache backend. An unreachable Redis degrades to the no-op
/// backend so the server still starts, uncached.
async fn build_backend(config: &Config) -> (Arc<dyn CacheStore>, Option<JoinHandle<()>>) {
    if !config.cache_enabled {
        return (Arc::new(NoopCacheStore) as Arc<dyn CacheStore>, None);
    }

    match config.cache_backend {
        CacheBackend::Redis => {
            let store: Arc<dyn CacheStore> =
                match RedisCacheStore::connect(&config.redis_url, config.redis_timeout()).await {
                    Ok(store) => Arc::new(store),
                    Err(error) => {
                        warn!(error = %error, "Redis unavailable, caching disabled for this process");
                        Arc::new(NoopCacheStore)
                    }
                };
            (store, None)
        }
        CacheBackend::Memory => {
            let store = Arc::new(MemoryCacheStore::new(config.max_entries));
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            (store as Arc<dyn CacheStore>, Some(handle))
        }
        CacheBackend::None => (Arc::new(NoopCacheStore) as Arc<dyn CacheStore>, None),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(error = %error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "Failed to install SIGTERM handler");
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        info!("Cleanup task aborted");
    }
}
