//! Public tracking lookup.

use axum::Json;
use axum::extract::{Path, State};

use barid_core::error::{AppError, ErrorKind};

use crate::dto::response::TrackingResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /tracking/{code}
pub async fn track_shipment(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<TrackingResponse>, ApiError> {
    let view = state
        .shipment_service
        .track(&code)
        .await
        .map_err(|e| match e.kind {
            ErrorKind::NotFound => AppError::not_found("Tracking number not found"),
            _ => e,
        })?;
    Ok(Json(TrackingResponse::from(view)))
}
