//! Admin shipment management.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};

use barid_service::shipment::UpdateShipmentRequest;

use crate::dto::response::{
    AdminHistoryEntry, AdminShipmentDetail, ShipmentAckResponse, ShipmentResponse,
};
use crate::error::ApiError;
use crate::extractors::{AdminAuth, JsonBody};
use crate::state::AppState;

/// GET /admin/shipments
///
/// The dashboard polls this list, so it must never be served from a cache.
pub async fn list_shipments(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Response, ApiError> {
    let shipments = state.shipment_service.list_recent().await?;
    let body: Vec<ShipmentResponse> = shipments.into_iter().map(ShipmentResponse::from).collect();

    let mut response = Json(body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    Ok(response)
}

/// GET /admin/shipments/{code}
pub async fn get_shipment(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(code): Path<String>,
) -> Result<Json<AdminShipmentDetail>, ApiError> {
    let (shipment, history) = state.shipment_service.admin_detail(&code).await?;
    Ok(Json(AdminShipmentDetail {
        shipment: ShipmentResponse::from(shipment),
        history: history.into_iter().map(AdminHistoryEntry::from).collect(),
    }))
}

/// PATCH /admin/shipments/{code}
pub async fn update_shipment(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(code): Path<String>,
    JsonBody(req): JsonBody<UpdateShipmentRequest>,
) -> Result<Json<ShipmentAckResponse>, ApiError> {
    let outcome = state.shipment_service.update(&code, req).await?;
    Ok(Json(ShipmentAckResponse {
        message: "Shipment updated successfully".to_string(),
        tracking_number: outcome.tracking_number,
    }))
}

/// DELETE /admin/shipments/{code}
pub async fn delete_shipment(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(code): Path<String>,
) -> Result<Json<ShipmentAckResponse>, ApiError> {
    let tracking_number = state.shipment_service.delete(&code).await?;
    Ok(Json(ShipmentAckResponse {
        message: "Shipment deleted successfully".to_string(),
        tracking_number,
    }))
}
