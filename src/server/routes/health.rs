//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::state::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether the built UI shell is present
    pub ui: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Degraded when the UI has not been built yet; the host still answers.
pub async fn full_health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let ui_ok = tokio::fs::try_exists(state.index_path())
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: if ui_ok { "healthy" } else { "degraded" }.to_string(),
        ui: if ui_ok { "ok" } else { "missing" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }
}
