//! Admin review moderation.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::ApprovalRequest;
use crate::dto::response::{MessageResponse, ReviewResponse};
use crate::error::ApiError;
use crate::extractors::{AdminAuth, JsonBody};
use crate::state::AppState;

/// GET /admin/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.review_service.list_all().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

/// PATCH /admin/reviews/{id}
pub async fn moderate_review(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ApprovalRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let approved = req.is_approved();
    state.review_service.set_approved(&id, approved).await?;
    Ok(Json(MessageResponse::new(if approved {
        "Review approved successfully"
    } else {
        "Review rejected successfully"
    })))
}

/// DELETE /admin/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.review_service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
