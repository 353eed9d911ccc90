//! Pure data structures (DTOs) implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.
//!
//! Every entity carries a store-assigned sequential id (`order_1`, `review_3`, ...) except
//! users, whose ids come from the external authentication provider.

pub mod cart;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
