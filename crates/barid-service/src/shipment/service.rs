//! Shipment lifecycle service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use barid_core::config::ShipmentsConfig;
use barid_core::error::AppError;
use barid_core::result::AppResult;
use barid_core::traits::DocumentStore;
use barid_core::types::{SortDirection, timestamp};
use barid_database::StoreMetrics;
use barid_database::repositories::{ShipmentRepository, TrackingRepository};
use barid_entity::shipment::{DeliveryOptions, PackageDetails, Party, Shipment, ShipmentStatus};
use barid_entity::tracking::TrackingEvent;

use super::generator::{TimestampGenerator, TrackingNumberGenerator};
use super::projection::{Projection, project};

/// Description of the event written when a shipment is created.
pub const INITIAL_EVENT_DESCRIPTION: &str = "Shipment created and collected";

/// Request to create a new shipment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    /// Sender details.
    pub sender: Option<Party>,
    /// Receiver details.
    pub receiver: Option<Party>,
    /// Parcel details.
    pub package_details: Option<PackageDetails>,
    /// Delivery preferences.
    pub delivery_options: Option<DeliveryOptions>,
}

/// Admin update of a shipment. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentRequest {
    /// New status.
    pub status: Option<ShipmentStatus>,
    /// New location; the current one is kept when absent.
    pub location: Option<String>,
    /// Event description; with status and location, appends an event.
    pub description: Option<String>,
    /// New estimated delivery date or date-time.
    pub estimated_delivery: Option<String>,
}

/// Result of an admin update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Tracking number of the updated shipment.
    pub tracking_number: String,
    /// Id of the appended tracking event, if one was written.
    pub event_id: Option<String>,
}

/// Tracking-facing view of a shipment.
#[derive(Debug, Clone)]
pub struct TrackingView {
    /// The stored shipment.
    pub shipment: Shipment,
    /// Projected current status and location.
    pub current: Projection,
    /// History, oldest first.
    pub history: Vec<TrackingEvent>,
}

/// Creates, reads, updates, and deletes shipment records.
#[derive(Debug, Clone)]
pub struct ShipmentService {
    /// Shipment repository.
    shipments: ShipmentRepository,
    /// Tracking repository.
    trackings: TrackingRepository,
    /// Candidate tracking-number source.
    generator: Arc<dyn TrackingNumberGenerator>,
    /// Limits and delivery windows.
    config: ShipmentsConfig,
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ShipmentService {
    /// Creates a new shipment service with the timestamp generator.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        metrics: Arc<StoreMetrics>,
        config: ShipmentsConfig,
    ) -> Self {
        let generator = Arc::new(TimestampGenerator::new(config.tracking_prefix.clone()));
        Self::with_generator(store, metrics, config, generator)
    }

    /// Creates a new shipment service with a custom generator.
    pub fn with_generator(
        store: Arc<dyn DocumentStore>,
        metrics: Arc<StoreMetrics>,
        config: ShipmentsConfig,
        generator: Arc<dyn TrackingNumberGenerator>,
    ) -> Self {
        Self {
            shipments: ShipmentRepository::new(store.clone(), metrics.clone()),
            trackings: TrackingRepository::new(store, metrics),
            generator,
            config,
        }
    }

    async fn unique_tracking_number(&self) -> AppResult<String> {
        for attempt in 1..=self.config.max_generation_attempts {
            let candidate = self.generator.generate().to_uppercase();
            if !self.shipments.exists(&candidate).await? {
                return Ok(candidate);
            }
            debug!(attempt, candidate = %candidate, "Tracking number collision");
        }
        warn!(
            attempts = self.config.max_generation_attempts,
            "Tracking number generation exhausted"
        );
        Err(AppError::generation_exhausted(
            "Failed to generate unique tracking number. Please try again.",
        ))
    }

    /// Create a shipment and its initial tracking event.
    pub async fn create(&self, req: CreateShipmentRequest) -> AppResult<Shipment> {
        let (Some(sender), Some(receiver), Some(package_details), Some(delivery_options)) = (
            req.sender,
            req.receiver,
            req.package_details,
            req.delivery_options,
        ) else {
            return Err(AppError::validation("Missing required fields"));
        };

        let tracking_number = self.unique_tracking_number().await?;
        let now = Utc::now();
        let days = if delivery_options.service_type.is_express() {
            self.config.express_delivery_days
        } else {
            self.config.standard_delivery_days
        };
        let location = sender.city_country();

        let shipment = Shipment {
            tracking_number: tracking_number.clone(),
            sender,
            receiver,
            package_details,
            delivery_options,
            status: ShipmentStatus::Pending,
            current_location: location.clone(),
            estimated_delivery: now + Duration::days(days),
            created_at: now,
            updated_at: now,
        };
        let event = TrackingEvent::new(
            tracking_number.clone(),
            ShipmentStatus::Pending,
            location,
            INITIAL_EVENT_DESCRIPTION,
            now,
        );

        let event_id = self.shipments.create_with_event(&shipment, &event).await?;
        info!(tracking_number = %tracking_number, event_id = %event_id, "Shipment created");
        Ok(shipment)
    }

    /// Look up a shipment by tracking number, ignoring case and whitespace.
    ///
    /// Tries the exact key first, then scans a bounded number of records.
    pub async fn get(&self, code: &str) -> AppResult<Shipment> {
        let normalized = normalize(code);
        if normalized.is_empty() {
            return Err(AppError::not_found("Shipment not found"));
        }

        if let Some(shipment) = self.shipments.find(&normalized).await? {
            return Ok(shipment);
        }

        debug!(tracking_number = %normalized, "Exact lookup missed, scanning");
        self.shipments
            .scan(self.config.lookup_scan_limit)
            .await?
            .into_iter()
            .find(|s| s.tracking_number.to_uppercase() == normalized)
            .ok_or_else(|| AppError::not_found("Shipment not found"))
    }

    /// Shipment with oldest-first history and projected current state.
    pub async fn track(&self, code: &str) -> AppResult<TrackingView> {
        let shipment = self.get(code).await?;
        let history = self
            .trackings
            .history(
                &shipment.tracking_number,
                SortDirection::Asc,
                self.config.history_fallback_limit,
            )
            .await?;
        let current = project(&shipment, &history);
        Ok(TrackingView {
            shipment,
            current,
            history,
        })
    }

    /// Shipment with newest-first history, for the admin detail view.
    pub async fn admin_detail(&self, code: &str) -> AppResult<(Shipment, Vec<TrackingEvent>)> {
        let shipment = self.get(code).await?;
        let history = self
            .trackings
            .history(
                &shipment.tracking_number,
                SortDirection::Desc,
                self.config.history_fallback_limit,
            )
            .await?;
        Ok((shipment, history))
    }

    /// Newest shipments first, capped by configuration.
    pub async fn list_recent(&self) -> AppResult<Vec<Shipment>> {
        self.shipments.list_recent(self.config.list_limit).await
    }

    /// Apply an admin update.
    ///
    /// Status changes also set the location (falling back to the current
    /// one) and bump `updatedAt`. An event is appended, in the same batch,
    /// only when status, location, and description are all supplied.
    pub async fn update(&self, code: &str, req: UpdateShipmentRequest) -> AppResult<UpdateOutcome> {
        let shipment = self.get(code).await?;

        let estimated_delivery = match non_empty(&req.estimated_delivery) {
            Some(raw) => Some(
                timestamp::parse_flexible(raw)
                    .ok_or_else(|| AppError::validation("Invalid date format"))?,
            ),
            None => None,
        };

        let now = Utc::now();
        let mut patch = Map::new();
        let mut event = None;

        if let Some(status) = req.status {
            let location = non_empty(&req.location)
                .map(str::to_string)
                .unwrap_or_else(|| shipment.current_location.clone());
            patch.insert("status".into(), serde_json::to_value(status)?);
            patch.insert("currentLocation".into(), Value::String(location));
            patch.insert("updatedAt".into(), timestamp::to_stored(now));

            if let (Some(location), Some(description)) =
                (non_empty(&req.location), non_empty(&req.description))
            {
                event = Some(TrackingEvent::new(
                    shipment.tracking_number.clone(),
                    status,
                    location,
                    description,
                    now,
                ));
            }
        }

        if let Some(date) = estimated_delivery {
            patch.insert("estimatedDelivery".into(), timestamp::to_stored(date));
        }

        if patch.is_empty() {
            debug!(tracking_number = %shipment.tracking_number, "Empty shipment update");
            return Ok(UpdateOutcome {
                tracking_number: shipment.tracking_number,
                event_id: None,
            });
        }

        let event_id = self
            .shipments
            .update_with_event(&shipment.tracking_number, Value::Object(patch), event.as_ref())
            .await?;

        info!(
            tracking_number = %shipment.tracking_number,
            status = ?req.status,
            event_appended = event_id.is_some(),
            "Shipment updated"
        );
        Ok(UpdateOutcome {
            tracking_number: shipment.tracking_number,
            event_id,
        })
    }

    /// Delete a shipment and all its tracking events.
    ///
    /// Returns the tracking number that was removed.
    pub async fn delete(&self, code: &str) -> AppResult<String> {
        let shipment = self.get(code).await?;
        let removed = self.shipments.delete_cascade(&shipment.tracking_number).await?;
        info!(
            tracking_number = %shipment.tracking_number,
            events_removed = removed,
            "Shipment deleted"
        );
        Ok(shipment.tracking_number)
    }
}
