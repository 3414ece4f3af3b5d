//! Public review handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use barid_service::review::SubmitReviewRequest;

use crate::dto::response::{ReviewResponse, ReviewSubmittedResponse};
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// GET /reviews
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.review_service.list_approved().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

/// POST /reviews
pub async fn submit_review(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ReviewSubmittedResponse>), ApiError> {
    let review = state.review_service.submit(req).await?;
    let approved = review.approved;
    Ok((
        StatusCode::CREATED,
        Json(ReviewSubmittedResponse {
            message: "Review submitted successfully".to_string(),
            review: ReviewResponse::from(review),
            approved,
        }),
    ))
}
