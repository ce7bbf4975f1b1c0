//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub meeting_schedules: bool,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks database connectivity and reports optional tables.
pub async fn ready(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = match state.store.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "unreachable".to_string()
        }
    };

    Json(HealthStatus {
        status: "ok".to_string(),
        database,
        meeting_schedules: state.features.meeting_schedules,
    })
}
