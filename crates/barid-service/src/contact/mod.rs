//! Contact form relay.

pub mod service;

pub use service::{ContactMessage, ContactRequest, ContactService};
