//! # Store Clients
//!
//! Domain-specific wrappers around the generic [`ResourceClient`](crate::framework::ResourceClient).
//! Each client implements [`ActorClient`](crate::framework::ActorClient) for the shared
//! `get` / `list` / `delete` operations and adds typed methods for its store. Framework
//! errors never leave this layer: they are translated into the store's own error enum.

pub mod cart_client;
pub mod order_client;
pub mod product_client;
pub mod review_client;

pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use review_client::ReviewClient;
