//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use makoti_store::checkout::{CheckoutItem, CheckoutRequest};
use makoti_store::clients::OrderClient;
use makoti_store::model::{Address, OrderId, OrderStatus, ProductId};
use makoti_store::reviews::ReviewSubmission;

pub fn address() -> Address {
    Address {
        street: "12 Long Street".to_string(),
        city: "Cape Town".to_string(),
        postal_code: "8001".to_string(),
        country: "ZA".to_string(),
        name: Some("Thandi".to_string()),
    }
}

/// A signed-in checkout of `quantity` cookies at 4.00 each.
pub fn checkout(user: &str, product_ids: &[u32], quantity: i64) -> CheckoutRequest {
    let items: Vec<CheckoutItem> = product_ids
        .iter()
        .map(|id| CheckoutItem {
            product_id: ProductId(*id),
            name: format!("Cookie {}", id),
            price: 4.0,
            quantity,
            image_url: None,
        })
        .collect();
    let total = 4.0 * quantity as f64 * items.len() as f64;
    CheckoutRequest {
        items: Some(items),
        total: Some(total),
        shipping_address: Some(address()),
        billing_address: None,
        payment_method: Some("stripe".to_string()),
        notes: None,
        user_token: Some("session-token".to_string()),
        user_id: Some(user.to_string()),
        user_email: Some(format!("{}@example.com", user)),
    }
}

/// Places an order and moves it straight to `status`.
pub async fn order_with_status(
    orders: &OrderClient,
    user: &str,
    product_ids: &[u32],
    status: OrderStatus,
) -> OrderId {
    let id = orders
        .place_order(checkout(user, product_ids, 1))
        .await
        .expect("Failed to place order");
    orders
        .update_status(id, status)
        .await
        .expect("Failed to update status");
    id
}

pub fn submission(user: &str, product_id: u32, rating: f64, comment: &str) -> ReviewSubmission {
    ReviewSubmission {
        product_id: ProductId(product_id),
        user_id: user.into(),
        user_name: user.to_string(),
        user_email: format!("{}@example.com", user),
        rating: Some(rating),
        comment: comment.to_string(),
    }
}
