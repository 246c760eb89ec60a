use std::sync::Arc;
use std::time::SystemTime;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::ServerState;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "tubelink-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// The router holds no connections or caches, so readiness reports the
/// active configuration rather than probing upstreams.
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let router = &state.router;
    Json(json!({
        "status": "ready",
        "service": "tubelink-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "platform": router.platform().name,
            "metadata_source": router.resolver().source_name(),
            "metadata_timeout_ms": router.resolver().timeout().as_millis() as u64,
            "interstitial_path": router.options().interstitial_path,
        }
    }))
}
