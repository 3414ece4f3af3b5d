//! # barid-core
//!
//! Core crate for the Al Barid logistics service. Contains the unified error
//! system, configuration schemas, shared value types (sorting, timestamp
//! conversion), and the [`DocumentStore`](traits::DocumentStore) trait that
//! every persistence backend implements.
//!
//! This crate has **no** internal dependencies on other Barid crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
