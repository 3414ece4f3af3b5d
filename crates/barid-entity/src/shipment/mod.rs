//! Shipment domain entities.

pub mod model;
pub mod status;

pub use model::{DeliveryOptions, PackageDetails, Party, Shipment};
pub use status::{ServiceType, ShipmentStatus};
