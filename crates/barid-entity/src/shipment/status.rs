//! Shipment status and service type enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a shipment.
///
/// Serialized with the display names shown to customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Registered, awaiting pickup.
    #[default]
    #[serde(alias = "Ordered")]
    Pending,
    /// Collected from the sender.
    #[serde(rename = "Picked Up")]
    PickedUp,
    /// Moving between facilities.
    #[serde(rename = "In Transit")]
    InTransit,
    /// With the courier for final delivery.
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    /// Handed to the receiver.
    Delivered,
    /// Held up (failed delivery, customs, damage).
    Exception,
}

impl ShipmentStatus {
    /// Return the customer-facing name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PickedUp => "Picked Up",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Exception => "Exception",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery speed tier.
///
/// Anything other than `"express"` is treated as standard service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ServiceType {
    /// Standard delivery.
    #[default]
    Standard,
    /// Express delivery.
    Express,
}

impl ServiceType {
    /// Return the service type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }

    /// Check if this is the express tier.
    pub fn is_express(&self) -> bool {
        matches!(self, Self::Express)
    }
}

impl From<String> for ServiceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for ServiceType {
    fn from(value: &str) -> Self {
        if value == "express" {
            Self::Express
        } else {
            Self::Standard
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
