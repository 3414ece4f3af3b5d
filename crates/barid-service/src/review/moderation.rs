//! Auto-approval rule for new reviews.

use barid_core::config::ReviewsConfig;

/// Decides whether a fresh review is published without moderation.
#[derive(Debug, Clone)]
pub struct AutoApproval {
    min_rating: i64,
    keywords: Vec<String>,
}

impl AutoApproval {
    pub fn new(min_rating: i64, keywords: &[String]) -> Self {
        Self {
            min_rating,
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &ReviewsConfig) -> Self {
        Self::new(config.auto_approve_min_rating, &config.spam_keywords)
    }

    /// Rating at or above the threshold and no blocked keyword in the text.
    pub fn approves(&self, rating: i64, text: &str) -> bool {
        if rating < self.min_rating {
            return false;
        }
        let text = text.to_lowercase();
        !self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
