//! `AdminAuth` extractor: pulls the admin token from the Authorization header
//! and verifies it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use barid_auth::Claims;
use barid_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Verified admin session claims, available in admin handlers.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl std::ops::Deref for AdminAuth {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.admin_gate.verify(token)?;
        if !claims.is_admin() {
            return Err(AppError::authentication("Invalid session token").into());
        }
        Ok(AdminAuth(claims))
    }
}
