//! Entity trait implementation for the Order domain type.
//!
//! Orders start `pending` with a store-assigned `created_at`. Fulfilment moves them
//! through the other statuses via [`OrderUpdate`]; they are never deleted in normal flow.

use super::OrderError;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = (); // No custom actions for now
    type ActionResult = ();
    type Query = OrderQuery;
    type Context = ();
    type Error = OrderError;

    /// Creates a new pending Order from creation parameters.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "Order must contain at least one item".to_string(),
            ));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            user_email: params.user_email,
            items: params.items,
            total: params.total,
            status: OrderStatus::Pending,
            payment_method: params.payment_method,
            shipping_address: params.shipping_address,
            billing_address: params.billing_address,
            notes: params.notes,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match query {
            OrderQuery::All => true,
            OrderQuery::ByUser(user_id) => &self.user_id == user_id,
            OrderQuery::ByUserAndStatus(user_id, status) => {
                &self.user_id == user_id && &self.status == status
            }
        }
    }

    /// Applies fulfilment changes and stamps `updated_at`.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
