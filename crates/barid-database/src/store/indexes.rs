//! Required composite index catalogue.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::info;

use barid_core::result::AppResult;
use barid_core::traits::{Collection, DocumentStore, IndexSpec, Query, WriteBatch};
use barid_core::types::timestamp;

/// Field names shared by repositories and the index catalogue.
pub mod fields {
    /// Shipment reference on tracking events.
    pub const TRACKING_NUMBER: &str = "trackingNumber";
    /// Event time on tracking events.
    pub const TIMESTAMP: &str = "timestamp";
    /// Creation time on shipments and reviews.
    pub const CREATED_AT: &str = "createdAt";
    /// Visibility flag on reviews.
    pub const APPROVED: &str = "approved";
}

/// Every index an ordered read in this service relies on.
pub fn required_indexes() -> Vec<IndexSpec> {
    vec![
        IndexSpec::new(
            Collection::Trackings,
            &[fields::TRACKING_NUMBER],
            fields::TIMESTAMP,
        ),
        IndexSpec::new(Collection::Reviews, &[fields::APPROVED], fields::CREATED_AT),
        IndexSpec::new(Collection::Reviews, &[], fields::CREATED_AT),
        IndexSpec::new(Collection::Shipments, &[], fields::CREATED_AT),
    ]
}

/// Rewrite order-field values held in a legacy timestamp shape (RFC 3339
/// string, `{seconds, nanos}` object) as epoch milliseconds.
///
/// Postgres orders raw JSONB, where numbers, strings and objects never
/// interleave; after this pass every orderable value is a number, so the
/// indexed path and the in-memory fallback sort agree. Returns the number of
/// documents rewritten.
pub async fn normalize_order_fields(
    store: &dyn DocumentStore,
    specs: &[IndexSpec],
) -> AppResult<usize> {
    let targets: BTreeSet<(Collection, &str)> = specs
        .iter()
        .map(|spec| (spec.collection, spec.order.as_str()))
        .collect();

    let mut rewritten = 0;
    for (collection, field) in targets {
        let mut batch = WriteBatch::new();
        for doc in store.query(&Query::new(collection)).await? {
            let Some(value) = doc.field(field) else {
                continue;
            };
            if value.is_number() {
                continue;
            }
            let Some(instant) = timestamp::from_stored(value) else {
                continue;
            };
            let mut patch = Map::new();
            patch.insert(field.to_string(), timestamp::to_stored(instant));
            batch.merge(collection, doc.id, Value::Object(patch));
        }

        if !batch.is_empty() {
            let count = batch.len();
            store.commit(batch).await?;
            info!(%collection, field, count, "Normalized legacy timestamps");
            rewritten += count;
        }
    }
    Ok(rewritten)
}
