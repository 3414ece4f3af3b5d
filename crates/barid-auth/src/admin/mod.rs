//! Admin session gate.

pub mod gate;

pub use gate::{AdminGate, AdminSession};
