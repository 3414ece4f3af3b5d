//! Shipment repository implementation.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use barid_core::result::AppResult;
use barid_core::traits::{Collection, DocumentStore, Query, WriteBatch};
use barid_core::types::SortField;
use barid_entity::shipment::Shipment;
use barid_entity::tracking::TrackingEvent;

use super::{decode_lenient, ordered_with_fallback};
use crate::metrics::StoreMetrics;
use crate::store::indexes::fields;

/// Repository for shipment documents and the writes that pair them with
/// tracking events.
#[derive(Debug, Clone)]
pub struct ShipmentRepository {
    store: Arc<dyn DocumentStore>,
    metrics: Arc<StoreMetrics>,
}

fn with_key(id: String, mut shipment: Shipment) -> Shipment {
    if shipment.tracking_number.is_empty() {
        shipment.tracking_number = id;
    }
    shipment
}

impl ShipmentRepository {
    /// Create a new shipment repository.
    pub fn new(store: Arc<dyn DocumentStore>, metrics: Arc<StoreMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Find a shipment by its exact document key.
    pub async fn find(&self, tracking_number: &str) -> AppResult<Option<Shipment>> {
        match self.store.get(Collection::Shipments, tracking_number).await? {
            Some(doc) => {
                let shipment: Shipment = serde_json::from_value(doc.data)?;
                Ok(Some(with_key(doc.id, shipment)))
            }
            None => Ok(None),
        }
    }

    /// Check whether a document key is taken.
    pub async fn exists(&self, tracking_number: &str) -> AppResult<bool> {
        Ok(self
            .store
            .get(Collection::Shipments, tracking_number)
            .await?
            .is_some())
    }

    /// Read up to `limit` shipments in store order.
    pub async fn scan(&self, limit: usize) -> AppResult<Vec<Shipment>> {
        let docs = self
            .store
            .query(&Query::new(Collection::Shipments).limit(limit))
            .await?;
        Ok(docs
            .into_iter()
            .filter_map(decode_lenient::<Shipment>)
            .map(|(id, s)| with_key(id, s))
            .collect())
    }

    /// Newest shipments first.
    pub async fn list_recent(&self, limit: usize) -> AppResult<Vec<Shipment>> {
        let query = Query::new(Collection::Shipments)
            .order_by(SortField::desc(fields::CREATED_AT))
            .limit(limit);
        let docs = ordered_with_fallback(self.store.as_ref(), &self.metrics, &query, limit).await?;
        Ok(docs
            .into_iter()
            .filter_map(decode_lenient::<Shipment>)
            .map(|(id, s)| with_key(id, s))
            .collect())
    }

    /// Store a new shipment together with its first tracking event.
    ///
    /// Returns the id assigned to the event.
    pub async fn create_with_event(
        &self,
        shipment: &Shipment,
        event: &TrackingEvent,
    ) -> AppResult<String> {
        let event_id = self.store.new_id();
        let mut batch = WriteBatch::new();
        batch
            .set(
                Collection::Shipments,
                shipment.tracking_number.clone(),
                serde_json::to_value(shipment)?,
            )
            .set(
                Collection::Trackings,
                event_id.clone(),
                serde_json::to_value(event)?,
            );
        self.store.commit(batch).await?;
        Ok(event_id)
    }

    /// Merge fields into a shipment and optionally append an event, atomically.
    ///
    /// Returns the id of the appended event, if any.
    pub async fn update_with_event(
        &self,
        tracking_number: &str,
        patch: Value,
        event: Option<&TrackingEvent>,
    ) -> AppResult<Option<String>> {
        let mut batch = WriteBatch::new();
        batch.merge(Collection::Shipments, tracking_number, patch);

        let event_id = match event {
            Some(event) => {
                let id = self.store.new_id();
                batch.set(Collection::Trackings, id.clone(), serde_json::to_value(event)?);
                Some(id)
            }
            None => None,
        };

        self.store.commit(batch).await?;
        Ok(event_id)
    }

    /// Delete a shipment and every tracking event that references it.
    ///
    /// Returns the number of events removed.
    pub async fn delete_cascade(&self, tracking_number: &str) -> AppResult<usize> {
        let events = self
            .store
            .query(
                &Query::new(Collection::Trackings)
                    .filter(fields::TRACKING_NUMBER, tracking_number),
            )
            .await?;

        let mut batch = WriteBatch::new();
        for event in &events {
            batch.delete(Collection::Trackings, event.id.clone());
        }
        batch.delete(Collection::Shipments, tracking_number);
        self.store.commit(batch).await?;

        debug!(tracking_number, events = events.len(), "Cascade delete committed");
        Ok(events.len())
    }
}
