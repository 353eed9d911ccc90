//! # Framework Errors
//!
//! Common error types shared by every store actor and client. Store-specific clients
//! translate these into their own error enums before anything reaches service code.

/// Errors that can occur within the resource framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Another entity already holds the same unique key.
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    /// A batch query named more keys than the store accepts in one call.
    #[error("Query too wide: {requested} keys requested, limit is {limit}")]
    QueryTooWide { requested: usize, limit: usize },
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an `EntityError`, if it is one.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
