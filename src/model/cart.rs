/// A shopping cart.
///
/// A cart with no `user_id` is anonymous: it belongs to a visitor who has not signed in.
/// Account carts are unique per user. The two are reconciled once, at sign-in, by
/// [`Cart::absorb`].
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
/// Mutations go through [`CartAction`](crate::cart_actor::CartAction).
use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: Option<UserId>,
    pub items: Vec<CartItem>,
    pub last_updated: DateTime<Utc>,
}

impl Cart {
    pub fn new(id: CartId, user_id: Option<UserId>) -> Self {
        Self {
            id,
            user_id,
            items: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Adds `item`, summing quantities when the product is already in the cart. Sums
    /// saturate at `u32::MAX`.
    pub fn add_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity)
            }
            None => self.items.push(item),
        }
        self.touch();
    }

    /// Returns whether the product was in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Sets a line's quantity; zero or less removes the line. Unknown products are
    /// ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.touch();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Merges another cart's lines into this one.
    ///
    /// Union by product id with quantities summed. For products present in both carts
    /// this cart's name, price and image are kept.
    pub fn absorb(&mut self, items: Vec<CartItem>) {
        for item in items {
            self.add_item(item);
        }
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

/// Payload for creating a cart.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub user_id: Option<UserId>,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartQuery {
    ByUser(UserId),
    Anonymous,
}
