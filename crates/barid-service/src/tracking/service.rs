//! Admin edits of individual tracking entries.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use barid_core::error::AppError;
use barid_core::result::AppResult;
use barid_core::traits::DocumentStore;
use barid_core::types::timestamp;
use barid_database::StoreMetrics;
use barid_database::repositories::TrackingRepository;
use barid_entity::shipment::ShipmentStatus;

/// Partial update of one tracking entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackingEntryRequest {
    /// New status.
    pub status: Option<ShipmentStatus>,
    /// New location; blank is ignored.
    pub location: Option<String>,
    /// New description; applied whenever present, even if blank.
    pub description: Option<String>,
    /// New timestamp; blank is ignored.
    pub timestamp: Option<String>,
}

/// Edits and deletes individual tracking entries.
#[derive(Debug, Clone)]
pub struct TrackingService {
    /// Tracking repository.
    trackings: TrackingRepository,
}

impl TrackingService {
    /// Creates a new tracking service.
    pub fn new(store: Arc<dyn DocumentStore>, metrics: Arc<StoreMetrics>) -> Self {
        Self {
            trackings: TrackingRepository::new(store, metrics),
        }
    }

    /// Overwrite only the supplied fields of an entry.
    pub async fn update_entry(&self, id: &str, req: UpdateTrackingEntryRequest) -> AppResult<()> {
        if self.trackings.find(id).await?.is_none() {
            return Err(AppError::not_found("Tracking entry not found"));
        }

        let mut patch = Map::new();
        if let Some(status) = req.status {
            patch.insert("status".into(), serde_json::to_value(status)?);
        }
        if let Some(location) = req.location.filter(|l| !l.trim().is_empty()) {
            patch.insert("location".into(), Value::String(location));
        }
        if let Some(description) = req.description {
            patch.insert("description".into(), Value::String(description));
        }
        if let Some(raw) = req.timestamp.filter(|t| !t.trim().is_empty()) {
            let parsed = timestamp::parse_flexible(&raw)
                .ok_or_else(|| AppError::validation("Invalid date format"))?;
            patch.insert("timestamp".into(), timestamp::to_stored(parsed));
        }

        let fields: Vec<String> = patch.keys().cloned().collect();
        if !self.trackings.update(id, Value::Object(patch)).await? {
            return Err(AppError::not_found("Tracking entry not found"));
        }
        info!(entry_id = %id, fields = ?fields, "Tracking entry updated");
        Ok(())
    }

    /// Delete one entry.
    pub async fn delete_entry(&self, id: &str) -> AppResult<()> {
        if !self.trackings.delete(id).await? {
            return Err(AppError::not_found("Tracking entry not found"));
        }
        info!(entry_id = %id, "Tracking entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barid_core::error::ErrorKind;
    use barid_core::traits::Collection;
    use barid_database::MemoryDocumentStore;
    use barid_entity::tracking::TrackingEvent;
    use chrono::DateTime;

    async fn setup() -> (TrackingService, TrackingRepository, String) {
        let store = Arc::new(MemoryDocumentStore::new());
        let event = TrackingEvent::new(
            "AB1",
            ShipmentStatus::InTransit,
            "Doha, Qatar",
            "Arrived at hub",
            DateTime::from_timestamp_millis(1_000).unwrap(),
        );
        let id = store
            .add(Collection::Trackings, serde_json::to_value(&event).unwrap())
            .await
            .unwrap();
        let metrics = Arc::new(StoreMetrics::new());
        let repo = TrackingRepository::new(store.clone(), Arc::clone(&metrics));
        (TrackingService::new(store, metrics), repo, id)
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_supplied_fields() {
        let (service, repo, id) = setup().await;
        service
            .update_entry(
                &id,
                UpdateTrackingEntryRequest {
                    location: Some("   ".into()),
                    description: Some(String::new()),
                    timestamp: Some("2024-05-01T08:30".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let entry = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(entry.tracking_number, "AB1");
        assert_eq!(entry.status, ShipmentStatus::InTransit);
        assert_eq!(entry.location, "Doha, Qatar");
        assert_eq!(entry.description, "");
        assert_eq!(timestamp::to_iso(entry.timestamp), "2024-05-01T08:30:00.000Z");
    }

    #[tokio::test]
    async fn test_invalid_timestamp_is_rejected() {
        let (service, repo, id) = setup().await;
        let err = service
            .update_entry(
                &id,
                UpdateTrackingEntryRequest {
                    status: Some(ShipmentStatus::Delivered),
                    timestamp: Some("yesterday-ish".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let entry = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(entry.status, ShipmentStatus::InTransit);
    }

    #[tokio::test]
    async fn test_unknown_entry() {
        let (service, _, _) = setup().await;
        let err = service
            .update_entry("missing", UpdateTrackingEntryRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(
            service.delete_entry("missing").await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let (service, repo, id) = setup().await;
        service.delete_entry(&id).await.unwrap();
        assert!(repo.find(&id).await.unwrap().is_none());
    }
}
