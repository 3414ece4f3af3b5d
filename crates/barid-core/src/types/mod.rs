//! Core type definitions used across the Barid workspace.

pub mod sorting;
pub mod timestamp;

pub use sorting::{SortDirection, SortField};
