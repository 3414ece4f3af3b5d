//! # barid-api
//!
//! HTTP API layer for Al Barid built on Axum.
//!
//! Provides the public shipment, tracking, rate, review and contact
//! endpoints, the token-gated admin endpoints, middleware (logging, CORS,
//! security headers), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
