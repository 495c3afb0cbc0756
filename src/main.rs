//! Read-Through Demo server binary
//!
//! Wires configuration, the key-value store and the origin client together
//! and serves the HTTP API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use read_through_demo::{
    api::create_router,
    config::{BackendKind, Config},
    spawn_cleanup_task, AppState, KvStore, MemoryKvBackend, RestKvBackend,
};

/// Main entry point for the read-through demo server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the store backend (and its sweeper for the in-process one)
/// 4. Create Axum router with all endpoints
/// 5. Serve until a shutdown signal arrives
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "read_through_demo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting read-through demo server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, origin={}, default_ttl={}s, port={}",
        config.backend, config.origin_base_url, config.default_ttl, config.server_port
    );

    let (store, cleanup_handle) = build_store(&config);
    let state = AppState::from_config(store, &config);

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

/// Constructs the configured store backend.
fn build_store(config: &Config) -> (KvStore, Option<JoinHandle<()>>) {
    match config.backend {
        BackendKind::Memory => {
            let backend = MemoryKvBackend::new();
            let handle = spawn_cleanup_task(backend.clone(), config.cleanup_interval);
            info!("Using in-process store");
            (KvStore::from_backend(backend), Some(handle))
        }
        BackendKind::Rest => {
            if config.kv_url.is_empty() || config.kv_token.is_empty() {
                warn!("KV_REST_API_URL or KV_REST_API_TOKEN is empty; every request will miss the cache");
            }
            let backend = RestKvBackend::new(config.kv_url.clone(), config.kv_token.clone());
            info!("Using REST key-value store");
            (KvStore::from_backend(backend), None)
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
