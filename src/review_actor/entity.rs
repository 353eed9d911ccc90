//! Entity trait implementation for the Review domain type.
//!
//! The store is the last line of defence for two rules:
//!
//! - **One review per user and product**: [`unique_key`](ActorEntity::unique_key) is
//!   `user/product`, checked by the actor before `on_create` inside its sequential loop.
//! - **Provenance**: `on_create` asks the order store for the referenced order and rejects
//!   the review unless that order belongs to the author, is `delivered` and contains the
//!   product.
//!
//! Reviews are immutable; updates and actions are rejected.

use super::ReviewError;
use crate::clients::OrderClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{Review, ReviewCreate, ReviewId, ReviewQuery};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

/// Bounds on the trimmed comment length, in characters.
pub const COMMENT_MIN_CHARS: usize = 10;
pub const COMMENT_MAX_CHARS: usize = 500;

#[async_trait]
impl ActorEntity for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Query = ReviewQuery;
    type Context = OrderClient;
    type Error = ReviewError;

    /// Builds the review with a store-assigned timestamp and a trimmed comment.
    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, Self::Error> {
        let comment = params.comment.trim().to_string();
        let chars = comment.chars().count();
        if !(COMMENT_MIN_CHARS..=COMMENT_MAX_CHARS).contains(&chars) {
            return Err(ReviewError::ValidationError(format!(
                "comment must be {}-{} characters, got {}",
                COMMENT_MIN_CHARS, COMMENT_MAX_CHARS, chars
            )));
        }
        Ok(Self {
            id,
            product_id: params.product_id,
            user_id: params.user_id,
            user_name: params.user_name,
            user_email: params.user_email,
            rating: params.rating,
            comment,
            order_id: params.order_id,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, query: &ReviewQuery) -> bool {
        match query {
            ReviewQuery::All => true,
            ReviewQuery::ByProduct(product_id) => &self.product_id == product_id,
            ReviewQuery::ByUser(user_id) => &self.user_id == user_id,
            ReviewQuery::ByUserAndProduct(user_id, product_id) => {
                &self.user_id == user_id && &self.product_id == product_id
            }
            ReviewQuery::ProductIn(product_ids) => product_ids.contains(&self.product_id),
        }
    }

    fn query_fan_out(query: &ReviewQuery) -> usize {
        match query {
            ReviewQuery::ProductIn(product_ids) => product_ids.len(),
            _ => 1,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("{}/{}", self.user_id, self.product_id))
    }

    /// Re-checks the provenance order against the order store.
    async fn on_create(&mut self, orders: &OrderClient) -> Result<(), Self::Error> {
        let order_ref = self.order_id.to_string();
        let ineligible = |reason: &str| ReviewError::Ineligible {
            order: order_ref.clone(),
            reason: reason.to_string(),
        };

        let order = orders
            .get(self.order_id)
            .await
            .map_err(|e| ReviewError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| ineligible("order not found"))?;

        if order.user_id != self.user_id {
            return Err(ineligible("order belongs to another user"));
        }
        if !order.is_delivered() {
            return Err(ineligible("order has not been delivered"));
        }
        if !order.contains_product(self.product_id) {
            return Err(ineligible("order does not contain the product"));
        }

        debug!(review = %self.id, order = %order.id, "Provenance verified");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderClient) -> Result<(), Self::Error> {
        Err(ReviewError::Immutable(self.id.to_string()))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &OrderClient) -> Result<(), Self::Error> {
        Err(ReviewError::Immutable(self.id.to_string()))
    }

    /// Deleting would free the `user/product` key for a second review.
    async fn on_delete(&self, _ctx: &OrderClient) -> Result<(), Self::Error> {
        Err(ReviewError::Immutable(self.id.to_string()))
    }
}
