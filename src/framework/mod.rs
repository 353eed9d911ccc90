//! Generic actor framework for resource management.
//!
//! This module provides the building blocks every store in the crate is made of: a
//! sequential actor that owns one collection, a typed client for it, and the trait
//! entities implement to plug into both.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns a collection and serves requests
//! - [`ResourceClient`] - Typed handle used to send requests to an actor
//! - [`ActorClient`] - Base trait for store-specific clients
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
