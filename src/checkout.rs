//! # Checkout validation
//!
//! Turns a client-submitted checkout payload into an [`OrderCreate`]. The client computes
//! the total it shows the shopper; the server recomputes it from the line items and
//! rejects the order if the two disagree by more than [`TOTAL_TOLERANCE_CENTS`].
//!
//! Money is compared in integer cents so the tolerance check is exact.

use crate::model::{Address, OrderCreate, OrderItem, PaymentMethod, ProductId, UserId};
use serde::Deserialize;
use thiserror::Error;

/// Largest accepted difference between submitted and computed totals, inclusive.
pub const TOTAL_TOLERANCE_CENTS: i64 = 2;

/// One cart line as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body of `POST /api/orders/create`. Every field is optional at the type level so
/// that missing fields produce a domain error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Option<Vec<CheckoutItem>>,
    pub total: Option<f64>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    /// Present when the shopper is signed in; `user_id` is only trusted alongside it.
    pub user_token: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("Items are required")]
    MissingItems,
    #[error("Valid total amount is required")]
    InvalidTotal,
    #[error("Shipping address is required")]
    MissingShippingAddress,
    #[error("Valid payment method is required")]
    InvalidPaymentMethod,
    #[error("Invalid item at position {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
    #[error("Total amount mismatch")]
    TotalMismatch { submitted_cents: i64, computed_cents: i64 },
}

/// Largest amount, in cents, accepted for a price or a total. Keeps every line product
/// and the order sum well inside `i64`.
const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000;

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn order_item(index: usize, item: CheckoutItem) -> Result<OrderItem, CheckoutError> {
    let invalid = |reason: &str| CheckoutError::InvalidItem {
        index,
        reason: reason.to_string(),
    };
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(invalid("price must be a non-negative amount"));
    }
    if to_cents(item.price) > MAX_AMOUNT_CENTS {
        return Err(invalid("amount too large"));
    }
    let quantity = u32::try_from(item.quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or_else(|| invalid("quantity must be positive"))?;

    Ok(OrderItem {
        product_id: item.product_id,
        name: item.name,
        price: item.price,
        quantity,
        image_url: item.image_url.unwrap_or_default(),
    })
}

/// Validates a checkout request.
///
/// Checks run in this order and the first failure wins: items present, total positive,
/// shipping address present, payment method known, each line well formed, totals agree.
/// Without a user token the order is recorded for the `guest` user. The billing address
/// defaults to the shipping address.
pub fn validate_order(request: CheckoutRequest) -> Result<OrderCreate, CheckoutError> {
    let items = request
        .items
        .filter(|items| !items.is_empty())
        .ok_or(CheckoutError::MissingItems)?;
    let total = request
        .total
        .filter(|total| {
            total.is_finite() && *total > 0.0 && to_cents(*total) <= MAX_AMOUNT_CENTS
        })
        .ok_or(CheckoutError::InvalidTotal)?;
    let shipping_address = request
        .shipping_address
        .ok_or(CheckoutError::MissingShippingAddress)?;
    let payment_method = request
        .payment_method
        .as_deref()
        .and_then(|method| method.parse::<PaymentMethod>().ok())
        .ok_or(CheckoutError::InvalidPaymentMethod)?;

    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| order_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let computed_cents = items
        .iter()
        .enumerate()
        .try_fold(0i64, |sum, (index, item)| {
            to_cents(item.price)
                .checked_mul(i64::from(item.quantity))
                .and_then(|line| sum.checked_add(line))
                .ok_or_else(|| CheckoutError::InvalidItem {
                    index,
                    reason: "amount too large".to_string(),
                })
        })?;
    let submitted_cents = to_cents(total);
    if (computed_cents - submitted_cents).abs() > TOTAL_TOLERANCE_CENTS {
        return Err(CheckoutError::TotalMismatch {
            submitted_cents,
            computed_cents,
        });
    }

    let signed_in = request
        .user_token
        .as_deref()
        .is_some_and(|token| !token.is_empty());
    let user_id = match request.user_id {
        Some(id) if signed_in && !id.trim().is_empty() => UserId(id),
        _ => UserId::guest(),
    };

    Ok(OrderCreate {
        user_id,
        user_email: request.user_email.unwrap_or_default(),
        items,
        total,
        payment_method,
        billing_address: request
            .billing_address
            .unwrap_or_else(|| shipping_address.clone()),
        shipping_address,
        notes: request.notes,
    })
}
