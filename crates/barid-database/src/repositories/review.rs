//! Review repository implementation.

use std::sync::Arc;

use serde_json::json;

use barid_core::result::AppResult;
use barid_core::traits::{Collection, DocumentStore, Query};
use barid_core::types::SortField;
use barid_entity::review::Review;

use super::{decode_lenient, ordered_with_fallback};
use crate::metrics::StoreMetrics;
use crate::store::indexes::fields;

/// Repository for customer reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    store: Arc<dyn DocumentStore>,
    metrics: Arc<StoreMetrics>,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(store: Arc<dyn DocumentStore>, metrics: Arc<StoreMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Store a review and return it with its assigned id.
    pub async fn insert(&self, review: &Review) -> AppResult<Review> {
        let id = self
            .store
            .add(Collection::Reviews, serde_json::to_value(review)?)
            .await?;
        Ok(review.clone().with_id(id))
    }

    /// Find a review by id.
    pub async fn find(&self, id: &str) -> AppResult<Option<Review>> {
        match self.store.get(Collection::Reviews, id).await? {
            Some(doc) => {
                let review: Review = serde_json::from_value(doc.data)?;
                Ok(Some(review.with_id(doc.id)))
            }
            None => Ok(None),
        }
    }

    /// Newest reviews first, optionally only approved ones.
    pub async fn list(
        &self,
        approved_only: bool,
        limit: usize,
        fallback_limit: usize,
    ) -> AppResult<Vec<Review>> {
        let mut query = Query::new(Collection::Reviews);
        if approved_only {
            query = query.filter(fields::APPROVED, true);
        }
        let query = query
            .order_by(SortField::desc(fields::CREATED_AT))
            .limit(limit);

        let docs =
            ordered_with_fallback(self.store.as_ref(), &self.metrics, &query, fallback_limit)
                .await?;
        Ok(docs
            .into_iter()
            .filter_map(decode_lenient::<Review>)
            .map(|(id, review)| review.with_id(id))
            .collect())
    }

    /// Set the approval flag. Returns `false` if the review does not exist.
    pub async fn set_approved(&self, id: &str, approved: bool) -> AppResult<bool> {
        self.store
            .merge(Collection::Reviews, id, json!({ "approved": approved }))
            .await
    }

    /// Delete a review. Returns `false` if it did not exist.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store.delete(Collection::Reviews, id).await
    }
}
