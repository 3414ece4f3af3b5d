//! Shipping cost estimate.
//!
//! A fixed linear formula over weight, volume and whether both ends are in
//! the same country. Only the delivery estimate is random, sampled from the
//! configured day range for the service type.

use rand::Rng;
use serde::{Deserialize, Serialize};

use barid_core::config::RatesConfig;
use barid_core::error::AppError;
use barid_core::result::AppResult;
use barid_entity::shipment::ServiceType;

use crate::lenient;

const BASE_RATE: f64 = 50.0;
const WEIGHT_RATE: f64 = 2.0;
const VOLUME_RATE: f64 = 0.5;
const DOMESTIC_FACTOR: f64 = 30.0;
const INTERNATIONAL_FACTOR: f64 = 50.0;
const EXPRESS_MULTIPLIER: f64 = 1.5;

/// Rate calculation input as posted by the quote form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub height: Option<f64>,
    pub service_type: Option<String>,
}

/// Individual terms of the cost formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBreakdown {
    pub base_rate: f64,
    pub weight_factor: f64,
    pub distance_factor: f64,
    pub volume_factor: f64,
    pub service_multiplier: f64,
}

/// A priced quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    /// Total cost rounded to two decimals.
    pub cost: f64,
    /// `"1 day"` or `"N days"`.
    pub estimated_delivery: String,
    pub currency: String,
    pub breakdown: RateBreakdown,
}

/// Validated inputs of the formula.
struct Parcel<'a> {
    origin: &'a str,
    destination: &'a str,
    weight: f64,
    length: f64,
    width: f64,
    height: f64,
    service: ServiceType,
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl RateRequest {
    fn parcel(&self) -> AppResult<Parcel<'_>> {
        let origin = self.origin.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let destination = self
            .destination
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let service = self
            .service_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (
            origin,
            destination,
            present(self.weight),
            present(self.length),
            present(self.width),
            present(self.height),
            service,
        ) {
            (
                Some(origin),
                Some(destination),
                Some(weight),
                Some(length),
                Some(width),
                Some(height),
                Some(service),
            ) => Ok(Parcel {
                origin,
                destination,
                weight,
                length,
                width,
                height,
                service: ServiceType::from(service),
            }),
            _ => Err(AppError::validation("Missing required fields")),
        }
    }
}

/// Country part of a `"City, Country"` location.
///
/// Text after the first comma, trimmed. Falls back to the whole string when
/// there is no comma or nothing follows it.
pub fn country_of(location: &str) -> &str {
    match location.split(',').nth(1).map(str::trim) {
        Some(country) if !country.is_empty() => country,
        _ => location.trim(),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn days_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Prices parcels and estimates delivery windows.
#[derive(Debug, Clone)]
pub struct RateEstimator {
    config: RatesConfig,
}

impl RateEstimator {
    /// Creates a new estimator.
    pub fn new(config: RatesConfig) -> Self {
        Self { config }
    }

    fn day_range(&self, service: ServiceType) -> (u32, u32) {
        let (min, max) = if service.is_express() {
            (self.config.express_days_min, self.config.express_days_max)
        } else {
            (self.config.standard_days_min, self.config.standard_days_max)
        };
        (min.min(max), min.max(max))
    }

    /// Price a parcel, sampling the delivery estimate from `rng`.
    pub fn estimate<R: Rng + ?Sized>(&self, req: &RateRequest, rng: &mut R) -> AppResult<RateQuote> {
        let parcel = req.parcel()?;

        let weight_factor = parcel.weight * WEIGHT_RATE;
        let volume_factor = parcel.length * parcel.width * parcel.height / 1000.0 * VOLUME_RATE;
        let distance_factor = if country_of(parcel.origin) == country_of(parcel.destination) {
            DOMESTIC_FACTOR
        } else {
            INTERNATIONAL_FACTOR
        };
        let service_multiplier = if parcel.service.is_express() {
            EXPRESS_MULTIPLIER
        } else {
            1.0
        };

        let cost = (BASE_RATE + weight_factor + distance_factor + volume_factor) * service_multiplier;
        let (min, max) = self.day_range(parcel.service);
        let days = rng.random_range(min..=max);

        Ok(RateQuote {
            cost: round_cents(cost),
            estimated_delivery: days_label(days),
            currency: self.config.currency.clone(),
            breakdown: RateBreakdown {
                base_rate: BASE_RATE,
                weight_factor,
                distance_factor,
                volume_factor,
                service_multiplier,
            },
        })
    }

    /// Price a parcel using the thread-local generator.
    pub fn quote(&self, req: &RateRequest) -> AppResult<RateQuote> {
        self.estimate(req, &mut rand::rng())
    }
}
