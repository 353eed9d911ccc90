//! # Review Client
//!
//! Provides a high-level API for interacting with the `Review` actor.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{ProductId, Review, ReviewCreate, ReviewId, ReviewQuery, UserId};
use crate::review_actor::ReviewError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Review actor.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
    batch_limit: usize,
}

fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>, batch_limit: usize) -> Self {
        Self { inner, batch_limit }
    }

    /// Most product ids one [`reviews_for_products`](Self::reviews_for_products) call
    /// may carry.
    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    /// Writes a review. The store re-checks uniqueness and provenance before inserting.
    #[instrument(skip(self, params), fields(user = %params.user_id, product = %params.product_id))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<ReviewId, ReviewError> {
        debug!(?params, "create_review called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Reviews for one product, newest first.
    #[instrument(skip(self))]
    pub async fn reviews_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, ReviewError> {
        let mut reviews = self.list(ReviewQuery::ByProduct(product_id)).await?;
        newest_first(&mut reviews);
        Ok(reviews)
    }

    /// Reviews written by one user, newest first.
    #[instrument(skip(self))]
    pub async fn reviews_for_user(&self, user_id: &UserId) -> Result<Vec<Review>, ReviewError> {
        let mut reviews = self.list(ReviewQuery::ByUser(user_id.clone())).await?;
        newest_first(&mut reviews);
        Ok(reviews)
    }

    /// One query for several products. More than [`batch_limit`](Self::batch_limit) ids
    /// fails with [`ReviewError::QueryTooWide`].
    #[instrument(skip(self), fields(count = product_ids.len()))]
    pub async fn reviews_for_products(
        &self,
        product_ids: &[ProductId],
    ) -> Result<Vec<Review>, ReviewError> {
        self.list(ReviewQuery::ProductIn(product_ids.to_vec())).await
    }

    #[instrument(skip(self))]
    pub async fn all_reviews(&self) -> Result<Vec<Review>, ReviewError> {
        self.list(ReviewQuery::All).await
    }

    #[instrument(skip(self))]
    pub async fn has_reviewed(
        &self,
        user_id: &UserId,
        product_id: ProductId,
    ) -> Result<bool, ReviewError> {
        let existing = self
            .list(ReviewQuery::ByUserAndProduct(user_id.clone(), product_id))
            .await?;
        Ok(!existing.is_empty())
    }
}

#[async_trait]
impl ActorClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &ResourceClient<Review> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<ReviewError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ReviewError::NotFound(id),
            FrameworkError::Conflict(key) => ReviewError::AlreadyReviewed(key),
            FrameworkError::QueryTooWide { requested, limit } => {
                ReviewError::QueryTooWide { requested, limit }
            }
            other => ReviewError::ActorCommunicationError(other.to_string()),
        }
    }
}
