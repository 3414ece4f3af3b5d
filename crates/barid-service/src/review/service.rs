//! Review submission and moderation.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use barid_core::config::ReviewsConfig;
use barid_core::error::AppError;
use barid_core::result::AppResult;
use barid_core::traits::DocumentStore;
use barid_database::StoreMetrics;
use barid_database::repositories::ReviewRepository;
use barid_entity::review::Review;

use super::moderation::AutoApproval;
use crate::lenient;

/// A review as submitted by a customer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub rating: Option<i64>,
    pub review_text: Option<String>,
    pub location: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accepts customer reviews and serves them publicly once approved.
#[derive(Debug, Clone)]
pub struct ReviewService {
    reviews: ReviewRepository,
    rule: AutoApproval,
    config: ReviewsConfig,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        metrics: Arc<StoreMetrics>,
        config: ReviewsConfig,
    ) -> Self {
        Self {
            reviews: ReviewRepository::new(store, metrics),
            rule: AutoApproval::from_config(&config),
            config,
        }
    }

    /// Validate and store a review, auto-approving it when the rule allows.
    pub async fn submit(&self, req: SubmitReviewRequest) -> AppResult<Review> {
        let (Some(customer_name), Some(rating), Some(review_text), Some(location)) = (
            required(req.customer_name),
            req.rating.filter(|r| *r != 0),
            required(req.review_text),
            required(req.location),
        ) else {
            return Err(AppError::validation("Missing required fields"));
        };
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let approved = self.rule.approves(rating, &review_text);
        let review = self
            .reviews
            .insert(&Review {
                id: String::new(),
                customer_name,
                rating,
                review_text,
                location,
                approved,
                created_at: Utc::now(),
            })
            .await?;

        info!(review_id = %review.id, rating, approved, "Review submitted");
        Ok(review)
    }

    /// Approved reviews, newest first.
    pub async fn list_approved(&self) -> AppResult<Vec<Review>> {
        self.reviews
            .list(true, self.config.public_limit, self.config.fallback_scan_limit)
            .await
    }

    /// Every review, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<Review>> {
        self.reviews
            .list(false, self.config.admin_limit, self.config.fallback_scan_limit)
            .await
    }

    /// Set the approval flag to exactly `approved`.
    pub async fn set_approved(&self, id: &str, approved: bool) -> AppResult<()> {
        if !self.reviews.set_approved(id, approved).await? {
            return Err(AppError::not_found("Review not found"));
        }
        info!(review_id = %id, approved, "Review moderated");
        Ok(())
    }

    /// Remove a review outright.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.reviews.delete(id).await? {
            return Err(AppError::not_found("Review not found"));
        }
        info!(review_id = %id, "Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barid_core::error::ErrorKind;
    use barid_core::traits::Collection;
    use barid_database::MemoryDocumentStore;
    use barid_database::store::required_indexes;
    use std::time::Duration;

    fn request(rating: i64, text: &str) -> SubmitReviewRequest {
        SubmitReviewRequest {
            customer_name: Some("Layla".into()),
            rating: Some(rating),
            review_text: Some(text.into()),
            location: Some("Muscat, Oman".into()),
        }
    }

    async fn service(indexed: bool) -> (ReviewService, Arc<StoreMetrics>) {
        let store = Arc::new(MemoryDocumentStore::new());
        if indexed {
            store.ensure_indexes(&required_indexes()).await.unwrap();
        }
        let metrics = Arc::new(StoreMetrics::new());
        let service = ReviewService::new(store, metrics.clone(), ReviewsConfig::default());
        (service, metrics)
    }

    #[tokio::test]
    async fn test_rating_bounds_and_auto_approval() {
        let (service, _) = service(true).await;

        for rating in [0, 6] {
            let err = service.submit(request(rating, "great")).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert_eq!(
            service.submit(request(6, "great")).await.unwrap_err().message,
            "Rating must be between 1 and 5"
        );

        assert!(service.submit(request(5, "great")).await.unwrap().approved);
        assert!(!service.submit(request(5, "this is spam")).await.unwrap().approved);
        assert!(!service.submit(request(3, "fine")).await.unwrap().approved);
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (service, _) = service(true).await;
        let mut req = request(5, "great");
        req.location = Some("  ".into());
        let err = service.submit(req).await.unwrap_err();
        assert_eq!(err.message, "Missing required fields");

        let mut req = request(5, "great");
        req.rating = None;
        assert_eq!(service.submit(req).await.unwrap_err().kind, ErrorKind::Validation);
    }

    async fn seed(service: &ReviewService) -> Vec<Review> {
        let mut out = Vec::new();
        for (rating, text) in [(5, "first"), (2, "second"), (4, "third")] {
            out.push(service.submit(request(rating, text)).await.unwrap());
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        out
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_on_both_paths() {
        for indexed in [true, false] {
            let (service, metrics) = service(indexed).await;
            seed(&service).await;

            let approved: Vec<String> = service
                .list_approved()
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.review_text)
                .collect();
            assert_eq!(approved, vec!["third", "first"]);

            let all: Vec<String> = service
                .list_all()
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.review_text)
                .collect();
            assert_eq!(all, vec!["third", "second", "first"]);

            let degraded = metrics.degraded(Collection::Reviews);
            assert_eq!(degraded, if indexed { 0 } else { 2 });
        }
    }

    #[tokio::test]
    async fn test_moderation() {
        let (service, _) = service(true).await;
        let seeded = seed(&service).await;
        let pending = &seeded[1];

        service.set_approved(&pending.id, true).await.unwrap();
        assert_eq!(service.list_approved().await.unwrap().len(), 3);

        service.set_approved(&pending.id, false).await.unwrap();
        assert_eq!(service.list_approved().await.unwrap().len(), 2);

        service.delete(&pending.id).await.unwrap();
        assert_eq!(service.list_all().await.unwrap().len(), 2);

        assert_eq!(
            service.set_approved(&pending.id, true).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete(&pending.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }
}
