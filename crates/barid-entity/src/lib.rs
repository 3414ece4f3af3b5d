//! # barid-entity
//!
//! Domain document models for Al Barid. Every struct in this crate is the
//! body of a document in one of the store's collections, or a value object
//! embedded in one. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`, use camelCase field names on the wire, and persist
//! instants through [`barid_core::types::timestamp`].

pub mod review;
pub mod shipment;
pub mod tracking;
