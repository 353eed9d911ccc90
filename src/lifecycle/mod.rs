//! # System Lifecycle & Orchestration
//!
//! Starts the store actors, wires them together, and shuts them down.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them at `run(context)` time. Only
//! the review store has one: it re-checks provenance orders through an `OrderClient`.
//!
//! ```rust,ignore
//! impl ActorEntity for Review {
//!     type Context = OrderClient;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for all actor tasks to finish
//!
//! The review store holds a clone of the `OrderClient`, so the order store outlives it.
//! The dependency graph is acyclic, so closure-driven shutdown always terminates.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging; see the [`tracing`] module.

pub mod store_system;
pub mod tracing;

pub use self::store_system::{StoreSystem, SystemError};
pub use self::tracing::setup_tracing;
