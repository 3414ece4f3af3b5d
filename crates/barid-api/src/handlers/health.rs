//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use tracing::error;

use barid_core::types::timestamp;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let now = timestamp::to_iso(Utc::now());
    let database_type = state.store.backend_name().to_string();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK".to_string(),
                message: "Al Barid Logistics API is running".to_string(),
                database: "connected".to_string(),
                database_type,
                timestamp: now,
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "ERROR".to_string(),
                    message: "Database connection failed".to_string(),
                    database: "disconnected".to_string(),
                    database_type,
                    timestamp: now,
                }),
            )
        }
    }
}

/// GET /health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<DetailedHealthResponse>) {
    let connected = state.store.ping().await.is_ok();
    let degraded_reads = state.metrics.snapshot();

    let status = match (connected, degraded_reads.total()) {
        (false, _) => "ERROR",
        (true, 0) => "OK",
        (true, _) => "DEGRADED",
    };
    let code = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(DetailedHealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if connected { "connected" } else { "disconnected" }.to_string(),
            database_type: state.store.backend_name().to_string(),
            degraded_reads,
            timestamp: timestamp::to_iso(Utc::now()),
        }),
    )
}
