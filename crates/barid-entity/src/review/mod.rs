//! Customer review entities.

pub mod model;

pub use model::Review;
