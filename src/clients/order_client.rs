//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>` and runs checkout validation before anything is
//! written.
use crate::checkout::{validate_order, CheckoutRequest};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderStatus, OrderUpdate, UserId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

/// Newest first; ties (same timestamp) fall back to the higher id.
pub(crate) fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores an already validated order. Prefer [`place_order`](Self::place_order) for
    /// client-supplied input.
    #[instrument(skip(self, params), fields(user = %params.user_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Validates a checkout request and stores the resulting pending order.
    #[instrument(skip(self, request))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<OrderId, OrderError> {
        let params = validate_order(request)?;
        info!(user = %params.user_id, items = params.items.len(), total = params.total, "Checkout validated");
        self.create_order(params).await
    }

    /// Order history for one user, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list(OrderQuery::ByUser(user_id.clone())).await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    /// The user's orders with status `delivered`, newest first.
    #[instrument(skip(self))]
    pub async fn delivered_orders_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(OrderQuery::ByUserAndStatus(
                user_id.clone(),
                OrderStatus::Delivered,
            ))
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    /// Moves an order to a new fulfilment status.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        let update = OrderUpdate {
            status: Some(status),
            notes: None,
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<OrderError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutError;
    use crate::framework::mock::{create_mock_client, MockClient};

    #[tokio::test]
    async fn test_place_order_rejects_before_sending() {
        // Nothing answers on the receiver; a request would hang the test.
        let (client, _receiver) = create_mock_client::<Order>(1);
        let orders = OrderClient::new(client);

        let result = orders.place_order(CheckoutRequest::default()).await;
        assert_eq!(
            result,
            Err(OrderError::Checkout(CheckoutError::MissingItems))
        );
    }

    #[tokio::test]
    async fn test_store_errors_are_translated() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_update()
            .return_err(FrameworkError::NotFound("order_9".to_string()));
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let orders = OrderClient::new(mock.client());
        assert_eq!(
            orders.update_status(OrderId(9), OrderStatus::Shipped).await,
            Err(OrderError::NotFound("order_9".to_string()))
        );
        assert!(matches!(
            orders.orders_for_user(&UserId::from("u-1")).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
