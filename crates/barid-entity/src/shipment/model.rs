//! Shipment document model.

use barid_core::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{ServiceType, ShipmentStatus};

/// Contact and address details of a sender or receiver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
}

impl Party {
    /// `"{city}, {country}"`, used as the initial shipment location.
    pub fn city_country(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Physical description of the parcel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageDetails {
    /// Weight in kilograms.
    pub weight: f64,
    /// Length in centimetres.
    pub length: f64,
    /// Width in centimetres.
    pub width: f64,
    /// Height in centimetres.
    pub height: f64,
    /// Free-text description of the contents.
    pub contents: String,
    /// Declared value.
    pub value: f64,
}

impl PackageDetails {
    /// `"L x W x H cm"`.
    pub fn dimensions(&self) -> String {
        format!("{} x {} x {} cm", self.length, self.width, self.height)
    }
}

/// Delivery preferences chosen at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryOptions {
    /// Speed tier.
    pub service_type: ServiceType,
    /// Whether the parcel is insured.
    pub insurance: bool,
    /// Courier instructions.
    pub special_instructions: String,
}

/// A shipment, stored in the `shipments` collection keyed by tracking number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// Unique uppercase tracking code, immutable after creation.
    #[serde(default)]
    pub tracking_number: String,
    /// Sender details.
    #[serde(default)]
    pub sender: Party,
    /// Receiver details.
    #[serde(default)]
    pub receiver: Party,
    /// Parcel details.
    #[serde(default)]
    pub package_details: PackageDetails,
    /// Delivery preferences.
    #[serde(default)]
    pub delivery_options: DeliveryOptions,
    /// Last status written to the shipment.
    #[serde(default)]
    pub status: ShipmentStatus,
    /// Last location written to the shipment.
    #[serde(default)]
    pub current_location: String,
    /// Estimated delivery instant.
    #[serde(default, with = "timestamp")]
    pub estimated_delivery: DateTime<Utc>,
    /// When the shipment was created.
    #[serde(default, with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the shipment was last updated.
    #[serde(default, with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    /// Location to show when the stored one is blank.
    pub fn display_location(&self) -> String {
        if self.current_location.trim().is_empty() {
            self.sender.city_country()
        } else {
            self.current_location.clone()
        }
    }
}
