//! Admin handlers. Everything except login requires an admin token.

pub mod auth;
pub mod reviews;
pub mod shipments;
pub mod tracking;
