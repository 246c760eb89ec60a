//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with the fixed endpoints and the link fallback
//! - Middleware stack (request id, logging, timeout, compression)
//! - Graceful shutdown handling

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::middleware::{log_requests, request_id};
use crate::routes::{health, link, redirect};
use crate::state::ServerState;

/// Build the Axum router with all routes and middleware
///
/// - `/health`, `/ready`: probes
/// - `<interstitial_path>` (default `/redirect`): mobile interstitial
/// - everything else: link routing
///
/// Middleware, outermost first: trace, request id, request logging,
/// compression, timeout.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let interstitial_path = state.router.options().interstitial_path.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(&interstitial_path, get(redirect::interstitial))
        .fallback(link::route_link)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the tubelink HTTP server
///
/// Installs JSON logging at the configured level, builds the router and
/// metadata resolver, binds, and serves until SIGTERM or Ctrl+C.
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    // An embedding binary may already have installed a subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .try_init();

    let state = Arc::new(ServerState::new(config.clone())?);
    let app = build_router(state.clone());
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        %addr,
        platform = %config.platform.name,
        web_host = %config.platform.web_host,
        metadata_source = state.router.resolver().source_name(),
        metadata_timeout_secs = config.metadata.timeout_secs,
        public_base_url = config.public_base_url.as_deref().unwrap_or("<from request>"),
        "server_starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server_stopped");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
