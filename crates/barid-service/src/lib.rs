//! # barid-service
//!
//! Business logic service layer for Al Barid. Each service orchestrates
//! repositories over the document store to implement one application use
//! case: shipment records, tracking history, rate estimates, review
//! moderation, and the contact relay.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time.

pub mod contact;
pub mod lenient;
pub mod rates;
pub mod review;
pub mod shipment;
pub mod tracking;

pub use contact::ContactService;
pub use rates::RateEstimator;
pub use review::ReviewService;
pub use shipment::{ShipmentService, TimestampGenerator, TrackingNumberGenerator};
pub use tracking::TrackingService;
