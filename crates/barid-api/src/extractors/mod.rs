//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::AdminAuth;
pub use json::JsonBody;
