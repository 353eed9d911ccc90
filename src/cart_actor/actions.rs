//! Custom actions for the Cart actor.

use crate::model::{CartItem, ProductId};

/// Line-item operations on a [`Cart`](crate::model::Cart). Every action returns the
/// updated cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds a line, summing quantities if the product is already present.
    AddItem(CartItem),
    RemoveItem(ProductId),
    /// Sets a line's quantity; zero or less removes it.
    SetQuantity(ProductId, i64),
    Clear,
    /// Merges lines taken from another cart.
    Absorb(Vec<CartItem>),
}
