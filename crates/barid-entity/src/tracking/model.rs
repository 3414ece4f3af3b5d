//! Tracking event document model.

use barid_core::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shipment::ShipmentStatus;

/// One entry in a shipment's history, stored in the `trackings` collection.
///
/// `id` is the store-assigned document id; it is never part of the
/// document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    /// Store-assigned id.
    #[serde(default, skip_serializing)]
    pub id: String,
    /// Tracking number of the owning shipment.
    pub tracking_number: String,
    /// Status at the time of the event.
    #[serde(default)]
    pub status: ShipmentStatus,
    /// Where the event happened.
    #[serde(default)]
    pub location: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// When the event happened.
    #[serde(default, with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl TrackingEvent {
    /// Build a new, not yet stored event.
    pub fn new(
        tracking_number: impl Into<String>,
        status: ShipmentStatus,
        location: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            tracking_number: tracking_number.into(),
            status,
            location: location.into(),
            description: description.into(),
            timestamp,
        }
    }

    /// Attach the store-assigned id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
