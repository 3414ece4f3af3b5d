//! Review Moderation Queue.

pub mod moderation;
pub mod service;

pub use moderation::AutoApproval;
pub use service::{ReviewService, SubmitReviewRequest};
