//! Review document model.

use barid_core::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer review, stored in the `reviews` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned id.
    #[serde(default, skip_serializing)]
    pub id: String,
    /// Reviewer's name.
    #[serde(default)]
    pub customer_name: String,
    /// Star rating, 1 to 5.
    #[serde(default)]
    pub rating: i64,
    /// Review body.
    #[serde(default)]
    pub review_text: String,
    /// Reviewer's location.
    #[serde(default)]
    pub location: String,
    /// Whether the review is publicly visible.
    #[serde(default)]
    pub approved: bool,
    /// Submission time.
    #[serde(default, with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Attach the store-assigned id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
