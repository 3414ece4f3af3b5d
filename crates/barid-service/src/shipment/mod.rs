//! Shipment Record Manager.

pub mod generator;
pub mod projection;
pub mod service;

pub use generator::{TimestampGenerator, TrackingNumberGenerator};
pub use projection::{Projection, project};
pub use service::{
    CreateShipmentRequest, ShipmentService, TrackingView, UpdateOutcome, UpdateShipmentRequest,
};
