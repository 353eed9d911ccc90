//! # Review Actor
//!
//! Stores product reviews and enforces, at write time, the rules that the submission
//! gate also checks up front: one review per user and product, and a delivered order
//! as provenance.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Review`]
//! - [`error`] - [`ReviewError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor's context is an [`OrderClient`](crate::clients::OrderClient):
//!
//! ```rust,ignore
//! let (review_actor, review_client) = review_actor::new(32, 10);
//! tokio::spawn(review_actor.run(order_client.clone()));
//! ```
//!
//! ## Batch ceiling
//!
//! `ReviewQuery::ProductIn` queries are capped at `batch_limit` product ids. Wider queries
//! fail with [`ReviewError::QueryTooWide`]; callers chunk (see
//! [`RatingAggregator::batch_ratings`](crate::reviews::RatingAggregator::batch_ratings)).

pub mod entity;
pub mod error;

pub use entity::{COMMENT_MAX_CHARS, COMMENT_MIN_CHARS};
pub use error::*;

use crate::clients::ReviewClient;
use crate::framework::ResourceActor;
use crate::model::Review;

/// Creates a new Review actor and its client.
pub fn new(buffer_size: usize, batch_limit: usize) -> (ResourceActor<Review>, ReviewClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (
        actor.with_fan_out_limit(batch_limit),
        ReviewClient::new(generic_client, batch_limit),
    )
}
