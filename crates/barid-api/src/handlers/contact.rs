//! Contact form relay.

use axum::Json;
use axum::extract::State;

use barid_service::contact::ContactRequest;

use crate::dto::response::ContactResponse;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /contact
pub async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    state.contact_service.submit(req)?;
    Ok(Json(ContactResponse {
        message: "Message received successfully".to_string(),
        success: true,
    }))
}
