//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested cart was not found.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The user already owns a cart.
    #[error("Cart already exists: {0}")]
    AlreadyExists(String),

    /// Items must be added with a positive quantity.
    #[error("Invalid quantity for {0}")]
    InvalidQuantity(String),

    /// Only anonymous carts can be merged into an account cart.
    #[error("Cart {0} is not anonymous")]
    NotAnonymous(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
