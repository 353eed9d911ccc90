//! Entity trait implementation for the Cart domain type.
//!
//! Account carts are unique per user (keyed on `user_id`); anonymous carts have no key.

use super::actions::CartAction;
use super::CartError;
use crate::framework::ActorEntity;
use crate::model::{Cart, CartCreate, CartId, CartItem, CartQuery};
use async_trait::async_trait;

fn check_quantity(item: &CartItem) -> Result<(), CartError> {
    if item.quantity == 0 {
        return Err(CartError::InvalidQuantity(item.product_id.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = (); // Carts change through actions only
    type Action = CartAction;
    type ActionResult = Cart;
    type Query = CartQuery;
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        let mut cart = Cart::new(id, params.user_id);
        for item in params.items {
            check_quantity(&item)?;
            cart.add_item(item);
        }
        Ok(cart)
    }

    fn matches(&self, query: &CartQuery) -> bool {
        match query {
            CartQuery::ByUser(user_id) => self.user_id.as_ref() == Some(user_id),
            CartQuery::Anonymous => self.is_anonymous(),
        }
    }

    fn unique_key(&self) -> Option<String> {
        self.user_id.as_ref().map(|user_id| user_id.to_string())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<Cart, Self::Error> {
        match action {
            CartAction::AddItem(item) => {
                check_quantity(&item)?;
                self.add_item(item);
            }
            CartAction::RemoveItem(product_id) => {
                self.remove_item(product_id);
            }
            CartAction::SetQuantity(product_id, quantity) => {
                self.set_quantity(product_id, quantity);
            }
            CartAction::Clear => self.clear(),
            CartAction::Absorb(items) => {
                let items = items.into_iter().filter(|item| item.quantity > 0).collect();
                self.absorb(items);
            }
        }
        Ok(self.clone())
    }
}
