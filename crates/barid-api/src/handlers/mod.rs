//! Route handlers organized by domain.

pub mod admin;
pub mod contact;
pub mod health;
pub mod rates;
pub mod review;
pub mod shipment;
pub mod tracking;
