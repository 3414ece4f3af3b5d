//! Typed repositories over the document store.
//!
//! Ordered reads go through [`ordered_with_fallback`], which degrades to a
//! capped unordered scan sorted in memory when the store reports a missing
//! index.

pub mod review;
pub mod shipment;
pub mod tracking;

pub use review::ReviewRepository;
pub use shipment::ShipmentRepository;
pub use tracking::TrackingRepository;

use serde::de::DeserializeOwned;
use tracing::warn;

use barid_core::result::AppResult;
use barid_core::traits::{Document, DocumentStore, Query};

use crate::metrics::StoreMetrics;
use crate::store::compare_values;

/// Run an ordered query, falling back to an in-memory sort over at most
/// `scan_limit` documents when the index is missing.
pub(crate) async fn ordered_with_fallback(
    store: &dyn DocumentStore,
    metrics: &StoreMetrics,
    query: &Query,
    scan_limit: usize,
) -> AppResult<Vec<Document>> {
    let err = match store.query(query).await {
        Ok(docs) => return Ok(docs),
        Err(err) if err.is_missing_index() => err,
        Err(err) => return Err(err),
    };

    warn!(
        collection = %query.collection,
        scan_limit,
        error = %err.message,
        "Index not found, using fallback query"
    );
    metrics.record_degraded(query.collection);

    let mut docs = store.query(&query.unordered().limit(scan_limit)).await?;
    docs.retain(|doc| query.matches(&doc.data));
    if let Some(sort) = &query.order_by {
        docs.sort_by(|a, b| {
            sort.direction
                .apply(compare_values(a.field(&sort.field), b.field(&sort.field)))
                .then_with(|| a.id.cmp(&b.id))
        });
    }
    if let Some(limit) = query.limit {
        docs.truncate(limit);
    }
    Ok(docs)
}

/// Decode a document body, logging and skipping documents that do not fit.
pub(crate) fn decode_lenient<T: DeserializeOwned>(doc: Document) -> Option<(String, T)> {
    match serde_json::from_value::<T>(doc.data) {
        Ok(value) => Some((doc.id, value)),
        Err(e) => {
            warn!(document_id = %doc.id, error = %e, "Skipping malformed document");
            None
        }
    }
}
