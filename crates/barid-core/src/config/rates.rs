//! Rate estimator configuration.

use serde::{Deserialize, Serialize};

/// Currency and delivery-window settings for rate quotes.
///
/// The cost formula itself is fixed; only the day ranges sampled for the
/// delivery estimate are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    /// ISO currency code attached to every quote.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Inclusive lower bound of the express delivery window, in days.
    #[serde(default = "default_express_min")]
    pub express_days_min: u32,
    /// Inclusive upper bound of the express delivery window, in days.
    #[serde(default = "default_express_max")]
    pub express_days_max: u32,
    /// Inclusive lower bound of the standard delivery window, in days.
    #[serde(default = "default_standard_min")]
    pub standard_days_min: u32,
    /// Inclusive upper bound of the standard delivery window, in days.
    #[serde(default = "default_standard_max")]
    pub standard_days_max: u32,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            express_days_min: default_express_min(),
            express_days_max: default_express_max(),
            standard_days_min: default_standard_min(),
            standard_days_max: default_standard_max(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_express_min() -> u32 {
    1
}

fn default_express_max() -> u32 {
    2
}

fn default_standard_min() -> u32 {
    3
}

fn default_standard_max() -> u32 {
    5
}
