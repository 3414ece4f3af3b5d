//! Admin edits of individual tracking entries.

use axum::Json;
use axum::extract::{Path, State};

use barid_service::tracking::UpdateTrackingEntryRequest;

use crate::dto::response::{MessageResponse, TrackingEntryUpdatedResponse};
use crate::error::ApiError;
use crate::extractors::{AdminAuth, JsonBody};
use crate::state::AppState;

/// PATCH /admin/tracking/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateTrackingEntryRequest>,
) -> Result<Json<TrackingEntryUpdatedResponse>, ApiError> {
    state.tracking_service.update_entry(&id, req).await?;
    Ok(Json(TrackingEntryUpdatedResponse {
        message: "Tracking entry updated successfully".to_string(),
        tracking_id: id,
    }))
}

/// DELETE /admin/tracking/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.tracking_service.delete_entry(&id).await?;
    Ok(Json(MessageResponse::new("Tracking entry deleted successfully")))
}
