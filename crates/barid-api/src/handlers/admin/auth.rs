//! Admin login.

use axum::Json;
use axum::extract::State;

use barid_core::types::timestamp;

use crate::dto::request::LoginRequest;
use crate::dto::response::LoginResponse;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.admin_gate.login(&req.password)?;
    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        expires_at: timestamp::to_iso(session.expires_at),
    }))
}
