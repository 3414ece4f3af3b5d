//! Rate calculator.

use axum::Json;
use axum::extract::State;

use barid_service::rates::RateRequest;

use crate::dto::response::RateResponse;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /rates/calculate
pub async fn calculate_rate(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RateRequest>,
) -> Result<Json<RateResponse>, ApiError> {
    Ok(Json(state.rate_estimator.quote(&req)?))
}
