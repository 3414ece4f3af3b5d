//! Shipment record configuration.

use serde::{Deserialize, Serialize};

/// Tracking-number generation, lookup, and delivery-estimate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentsConfig {
    /// Fixed prefix of every generated tracking number.
    #[serde(default = "default_prefix")]
    pub tracking_prefix: String,
    /// How many candidate numbers to try before giving up.
    #[serde(default = "default_attempts")]
    pub max_generation_attempts: u32,
    /// Cap on the case-insensitive lookup scan.
    #[serde(default = "default_lookup_scan")]
    pub lookup_scan_limit: usize,
    /// Cap on the admin shipment list.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Cap on unordered history reads when the tracking index is missing.
    #[serde(default = "default_history_fallback")]
    pub history_fallback_limit: usize,
    /// Days added to creation time for express shipments.
    #[serde(default = "default_express_days")]
    pub express_delivery_days: i64,
    /// Days added to creation time for standard shipments.
    #[serde(default = "default_standard_days")]
    pub standard_delivery_days: i64,
}

impl Default for ShipmentsConfig {
    fn default() -> Self {
        Self {
            tracking_prefix: default_prefix(),
            max_generation_attempts: default_attempts(),
            lookup_scan_limit: default_lookup_scan(),
            list_limit: default_list_limit(),
            history_fallback_limit: default_history_fallback(),
            express_delivery_days: default_express_days(),
            standard_delivery_days: default_standard_days(),
        }
    }
}

fn default_prefix() -> String {
    "AB".to_string()
}

fn default_attempts() -> u32 {
    10
}

fn default_lookup_scan() -> usize {
    500
}

fn default_list_limit() -> usize {
    100
}

fn default_history_fallback() -> usize {
    500
}

fn default_express_days() -> i64 {
    2
}

fn default_standard_days() -> i64 {
    5
}
