//! TTL Proxy - A minimal HTTP reverse proxy with a response cache
//!
//! Forwards each request to a randomly chosen backend for its path, rewrites
//! the response body and caches it for a short TTL.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_proxy::{create_router, spawn_sweep_task, AppState, Config};

/// Main entry point for the proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the proxy with its route table, client and cache
/// 4. Start background TTL sweep task, unless disabled
/// 5. Create Axum router wrapping the proxy in the cache layer
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL Proxy");

    let config = Config::from_env();
    info!(
        "Configuration loaded: routes={}, cache_ttl={:?}, port={}, sweep_interval={}s, upstream_timeout={:?}",
        config.routes.len(),
        config.cache_ttl,
        config.server_port,
        config.sweep_interval,
        config.upstream_timeout
    );

    let state = AppState::from_config(&config).context("Failed to build upstream HTTP client")?;
    info!("Proxy initialized");

    let sweep_handle = if config.sweep_interval > 0 {
        let handle = spawn_sweep_task(state.proxy.cache().clone(), config.sweep_interval);
        info!("Background sweep task started");
        Some(handle)
    } else {
        info!("Background sweep task disabled");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
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

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Sweep task aborted");
    }
}
