//! Tracking event repository implementation.

use std::sync::Arc;

use serde_json::Value;

use barid_core::result::AppResult;
use barid_core::traits::{Collection, DocumentStore, Query};
use barid_core::types::{SortDirection, SortField};
use barid_entity::tracking::TrackingEvent;

use super::{decode_lenient, ordered_with_fallback};
use crate::metrics::StoreMetrics;
use crate::store::indexes::fields;

/// Repository for tracking events.
#[derive(Debug, Clone)]
pub struct TrackingRepository {
    store: Arc<dyn DocumentStore>,
    metrics: Arc<StoreMetrics>,
}

impl TrackingRepository {
    /// Create a new tracking repository.
    pub fn new(store: Arc<dyn DocumentStore>, metrics: Arc<StoreMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Find an event by id.
    pub async fn find(&self, id: &str) -> AppResult<Option<TrackingEvent>> {
        match self.store.get(Collection::Trackings, id).await? {
            Some(doc) => {
                let event: TrackingEvent = serde_json::from_value(doc.data)?;
                Ok(Some(event.with_id(doc.id)))
            }
            None => Ok(None),
        }
    }

    /// Full history of a shipment ordered by timestamp.
    ///
    /// `fallback_limit` caps the scan used when the index is missing.
    pub async fn history(
        &self,
        tracking_number: &str,
        direction: SortDirection,
        fallback_limit: usize,
    ) -> AppResult<Vec<TrackingEvent>> {
        let query = Query::new(Collection::Trackings)
            .filter(fields::TRACKING_NUMBER, tracking_number)
            .order_by(SortField::new(fields::TIMESTAMP, direction));
        let docs =
            ordered_with_fallback(self.store.as_ref(), &self.metrics, &query, fallback_limit)
                .await?;
        Ok(docs
            .into_iter()
            .filter_map(decode_lenient::<TrackingEvent>)
            .map(|(id, event)| event.with_id(id))
            .collect())
    }

    /// Overwrite the supplied fields. Returns `false` if the event does not exist.
    pub async fn update(&self, id: &str, patch: Value) -> AppResult<bool> {
        self.store.merge(Collection::Trackings, id, patch).await
    }

    /// Delete an event. Returns `false` if it did not exist.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store.delete(Collection::Trackings, id).await
    }
}
