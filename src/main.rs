//! Analysis Cache - a read-through TTL cache with request coalescing
//!
//! Runs the cache with its operator-facing monitor API and the periodic
//! hygiene sweep.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_sweep_task;

/// Main entry point for the analysis cache monitor server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache store with configured parameters
/// 4. Start the background hygiene sweep task
/// 5. Create the Axum router with all endpoints
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analysis_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting analysis cache monitor");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, default_ttl_ms={}, port={}, sweep_interval={}s",
        config.max_entries, config.default_ttl_ms, config.server_port, config.sweep_interval_secs
    );

    // Create application state with the cache store
    let state = AppState::from_config(&config);
    info!("Cache store initialized");

    // Start the background hygiene sweep
    let sweep_handle = spawn_sweep_task(
        state.cache.store().clone(),
        config.sweep_interval_secs,
    );
    info!("Background sweep task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Monitor listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    // Abort the sweep task
    sweep_handle.abort();
    warn!("Sweep task aborted");
}
