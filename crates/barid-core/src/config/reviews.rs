//! Review moderation configuration.

use serde::{Deserialize, Serialize};

/// Listing caps and auto-approval rules for customer reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsConfig {
    /// Maximum approved reviews returned publicly.
    #[serde(default = "default_public_limit")]
    pub public_limit: usize,
    /// Maximum reviews returned to the admin list.
    #[serde(default = "default_admin_limit")]
    pub admin_limit: usize,
    /// Documents scanned when the ordered review index is missing.
    #[serde(default = "default_fallback_scan")]
    pub fallback_scan_limit: usize,
    /// Minimum rating eligible for auto-approval.
    #[serde(default = "default_min_rating")]
    pub auto_approve_min_rating: i64,
    /// Case-insensitive substrings that block auto-approval.
    #[serde(default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            public_limit: default_public_limit(),
            admin_limit: default_admin_limit(),
            fallback_scan_limit: default_fallback_scan(),
            auto_approve_min_rating: default_min_rating(),
            spam_keywords: default_spam_keywords(),
        }
    }
}

fn default_public_limit() -> usize {
    50
}

fn default_admin_limit() -> usize {
    100
}

fn default_fallback_scan() -> usize {
    100
}

fn default_min_rating() -> i64 {
    4
}

fn default_spam_keywords() -> Vec<String> {
    ["spam", "test", "fake", "scam"]
        .into_iter()
        .map(String::from)
        .collect()
}
