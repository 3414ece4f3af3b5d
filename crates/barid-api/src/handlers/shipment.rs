//! Public shipment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use barid_service::shipment::CreateShipmentRequest;

use crate::dto::response::{CreateShipmentResponse, ShipmentResponse};
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /shipments
pub async fn create_shipment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<CreateShipmentResponse>), ApiError> {
    let shipment = state.shipment_service.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateShipmentResponse {
            message: "Shipment created successfully".to_string(),
            tracking_number: shipment.tracking_number.clone(),
            shipment: ShipmentResponse::from(shipment),
        }),
    ))
}

/// GET /shipments/{code}
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ShipmentResponse>, ApiError> {
    let shipment = state.shipment_service.get(&code).await?;
    Ok(Json(ShipmentResponse::from(shipment)))
}
