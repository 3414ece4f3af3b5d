//! Rate Estimator.

pub mod estimator;

pub use estimator::{RateBreakdown, RateEstimator, RateQuote, RateRequest};
