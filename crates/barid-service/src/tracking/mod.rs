//! Tracking Event Log.

pub mod service;

pub use service::{TrackingService, UpdateTrackingEntryRequest};
