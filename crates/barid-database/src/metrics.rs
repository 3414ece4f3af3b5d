//! Degraded-read counters.
//!
//! Incremented every time an ordered read falls back to an unordered scan
//! because its index is missing. Reported by the detailed health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use barid_core::traits::Collection;

/// Per-collection count of index-fallback reads.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    shipments: AtomicU64,
    trackings: AtomicU64,
    reviews: AtomicU64,
}

/// Point-in-time copy of [`StoreMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedReads {
    /// Fallback reads against `shipments`.
    pub shipments: u64,
    /// Fallback reads against `trackings`.
    pub trackings: u64,
    /// Fallback reads against `reviews`.
    pub reviews: u64,
}

impl DegradedReads {
    /// Sum over all collections.
    pub fn total(&self) -> u64 {
        self.shipments + self.trackings + self.reviews
    }
}

impl StoreMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, collection: Collection) -> &AtomicU64 {
        match collection {
            Collection::Shipments => &self.shipments,
            Collection::Trackings => &self.trackings,
            Collection::Reviews => &self.reviews,
        }
    }

    /// Record one fallback read.
    pub fn record_degraded(&self, collection: Collection) {
        self.counter(collection).fetch_add(1, Ordering::Relaxed);
    }

    /// Fallback reads recorded for one collection.
    pub fn degraded(&self, collection: Collection) -> u64 {
        self.counter(collection).load(Ordering::Relaxed)
    }

    /// Copy all counters.
    pub fn snapshot(&self) -> DegradedReads {
        DegradedReads {
            shipments: self.degraded(Collection::Shipments),
            trackings: self.degraded(Collection::Trackings),
            reviews: self.degraded(Collection::Reviews),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_collection() {
        let metrics = StoreMetrics::new();
        metrics.record_degraded(Collection::Reviews);
        metrics.record_degraded(Collection::Reviews);
        metrics.record_degraded(Collection::Trackings);

        let snap = metrics.snapshot();
        assert_eq!(snap.reviews, 2);
        assert_eq!(snap.trackings, 1);
        assert_eq!(snap.shipments, 0);
        assert_eq!(snap.total(), 3);
    }
}
