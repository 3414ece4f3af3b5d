//! Tracking event entities.

pub mod model;

pub use model::TrackingEvent;
