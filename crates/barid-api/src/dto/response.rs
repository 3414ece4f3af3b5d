//! Response DTOs.
//!
//! Stored documents keep instants as epoch milliseconds; everything sent to
//! clients renders them as RFC 3339 strings.

use serde::Serialize;

use barid_core::types::timestamp;
use barid_database::metrics::DegradedReads;
use barid_entity::review::Review;
use barid_entity::shipment::{DeliveryOptions, PackageDetails, Party, Shipment, ShipmentStatus};
use barid_entity::tracking::TrackingEvent;
use barid_service::rates::RateQuote;
use barid_service::shipment::TrackingView;

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A shipment as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub tracking_number: String,
    pub sender: Party,
    pub receiver: Party,
    pub package_details: PackageDetails,
    pub delivery_options: DeliveryOptions,
    pub status: ShipmentStatus,
    pub current_location: String,
    pub estimated_delivery: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Shipment> for ShipmentResponse {
    fn from(s: Shipment) -> Self {
        Self {
            id: s.tracking_number.clone(),
            estimated_delivery: timestamp::to_iso(s.estimated_delivery),
            created_at: timestamp::to_iso(s.created_at),
            updated_at: timestamp::to_iso(s.updated_at),
            tracking_number: s.tracking_number,
            sender: s.sender,
            receiver: s.receiver,
            package_details: s.package_details,
            delivery_options: s.delivery_options,
            status: s.status,
            current_location: s.current_location,
        }
    }
}

/// Response to `POST /shipments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentResponse {
    pub message: String,
    pub tracking_number: String,
    pub shipment: ShipmentResponse,
}

/// Package details with the rendered dimensions string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedPackage {
    #[serde(flatten)]
    pub details: PackageDetails,
    pub dimensions: String,
}

/// One history line on the public tracking page.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub status: ShipmentStatus,
    pub location: String,
    pub timestamp: String,
    pub description: String,
}

impl From<TrackingEvent> for HistoryEntry {
    fn from(e: TrackingEvent) -> Self {
        Self {
            status: e.status,
            location: e.location,
            timestamp: timestamp::to_iso(e.timestamp),
            description: e.description,
        }
    }
}

/// Response to `GET /tracking/{code}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub tracking_number: String,
    pub status: ShipmentStatus,
    pub current_location: String,
    /// `YYYY-MM-DD`.
    pub estimated_delivery: String,
    pub history: Vec<HistoryEntry>,
    pub sender: Party,
    pub receiver: Party,
    pub package_details: TrackedPackage,
    pub delivery_options: DeliveryOptions,
}

impl From<TrackingView> for TrackingResponse {
    fn from(view: TrackingView) -> Self {
        let TrackingView {
            shipment,
            current,
            history,
        } = view;
        let dimensions = shipment.package_details.dimensions();
        Self {
            tracking_number: shipment.tracking_number,
            status: current.status,
            current_location: current.location,
            estimated_delivery: timestamp::to_date_string(shipment.estimated_delivery),
            history: history.into_iter().map(HistoryEntry::from).collect(),
            sender: shipment.sender,
            receiver: shipment.receiver,
            package_details: TrackedPackage {
                details: shipment.package_details,
                dimensions,
            },
            delivery_options: shipment.delivery_options,
        }
    }
}

/// A history entry as shown to admins, with the id used to edit it.
#[derive(Debug, Clone, Serialize)]
pub struct AdminHistoryEntry {
    pub id: String,
    #[serde(flatten)]
    pub entry: HistoryEntry,
}

impl From<TrackingEvent> for AdminHistoryEntry {
    fn from(e: TrackingEvent) -> Self {
        Self {
            id: e.id.clone(),
            entry: HistoryEntry::from(e),
        }
    }
}

/// Response to `GET /admin/shipments/{code}`.
#[derive(Debug, Clone, Serialize)]
pub struct AdminShipmentDetail {
    #[serde(flatten)]
    pub shipment: ShipmentResponse,
    /// Newest first.
    pub history: Vec<AdminHistoryEntry>,
}

/// Response to `PATCH` and `DELETE /admin/shipments/{code}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentAckResponse {
    pub message: String,
    pub tracking_number: String,
}

/// Response to `PATCH /admin/tracking/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntryUpdatedResponse {
    pub message: String,
    pub tracking_id: String,
}

/// A review as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_name: String,
    pub rating: i64,
    pub review_text: String,
    pub location: String,
    pub approved: bool,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            customer_name: r.customer_name,
            rating: r.rating,
            review_text: r.review_text,
            location: r.location,
            approved: r.approved,
            created_at: timestamp::to_iso(r.created_at),
        }
    }
}

/// Response to `POST /reviews`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSubmittedResponse {
    pub message: String,
    pub review: ReviewResponse,
    pub approved: bool,
}

/// Response to `POST /rates/calculate`.
pub type RateResponse = RateQuote;

/// Response to `POST /admin/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: String,
}

/// Response to `POST /contact`.
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub message: String,
    pub success: bool,
}

/// Response to `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub database: String,
    pub database_type: String,
    pub timestamp: String,
}

/// Response to `GET /health/detailed`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub database_type: String,
    pub degraded_reads: DegradedReads,
    pub timestamp: String,
}
