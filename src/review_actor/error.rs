//! Error types for the Review actor.

use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    /// The requested review was not found.
    #[error("Review not found: {0}")]
    NotFound(String),

    /// The author already has a review for this product.
    #[error("Review already exists: {0}")]
    AlreadyReviewed(String),

    /// The order named as provenance does not entitle the author to review the product.
    #[error("Order {order} does not qualify: {reason}")]
    Ineligible { order: String, reason: String },

    /// The review data provided is invalid.
    #[error("Review validation error: {0}")]
    ValidationError(String),

    /// Reviews cannot be edited once written.
    #[error("Review {0} is immutable")]
    Immutable(String),

    /// A batch query named more products than the store accepts at once.
    #[error("Too many products in one query: {requested} (limit {limit})")]
    QueryTooWide { requested: usize, limit: usize },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
