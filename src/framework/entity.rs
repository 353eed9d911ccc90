//! # ActorEntity
//!
//! What a stored type must provide for a [`ResourceActor`](crate::framework::ResourceActor)
//! to own it: how it is built from a create payload, which queries it answers, and
//! the hooks the store runs around each mutation.
//!
//! Orders, reviews, products and carts all implement it. The associated types pin each
//! store to its own payloads: the order store only accepts `OrderCreate` and only
//! answers `OrderQuery`.
//!
//! Hooks with defaults: [`on_create`](ActorEntity::on_create),
//! [`on_delete`](ActorEntity::on_delete), [`unique_key`](ActorEntity::unique_key) and
//! [`query_fan_out`](ActorEntity::query_fan_out). Out of the box an entity has no
//! uniqueness constraint and every query counts as one key.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A type managed by a `ResourceActor`.
///
/// Hooks are async and receive the store's `Context`, the dependencies handed to
/// `run()`. The review store, for one, gets an `OrderClient` so `on_create` can look up
/// the order a review cites.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Store-assigned identifier, minted from a per-store counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    type Create: Send + Sync + Debug;

    type Update: Send + Sync + Debug;

    /// Store-specific mutations, e.g. `MarkBestseller` or `AddItem`.
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Filter understood by `List` requests.
    type Query: Send + Sync + Debug;

    /// Dependencies passed to `run()`; `()` for self-contained stores.
    type Context: Send + Sync;

    /// One error enum for the whole store rather than one per message.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity for a freshly minted id. Runs before `on_create` and may reject
    /// the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity belongs in the result of `query`.
    fn matches(&self, query: &Self::Query) -> bool;

    /// Number of keys a query asks for in one call. Stores configured with a fan-out
    /// ceiling reject queries above it.
    fn query_fan_out(_query: &Self::Query) -> usize {
        1
    }

    /// Key that must be unique across the whole collection, if any.
    /// Checked by the actor before `on_create`, inside its sequential loop.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Last check before insertion; an error aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies `update` to a working copy. The store keeps the copy only on `Ok`.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal; an error keeps the entity.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a store-specific action to a working copy, like `on_update`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
