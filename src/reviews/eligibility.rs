//! # Eligibility Resolver
//!
//! A user may review a product when one of their `delivered` orders contains it and they
//! have not reviewed it yet. The resolver is advisory: it drives what the storefront
//! offers, while [`SubmissionGate`](super::SubmissionGate) and the review store enforce
//! the rule at write time.

use super::error::EligibilityError;
use crate::clients::{OrderClient, ReviewClient};
use crate::model::{Order, ProductId, Review, UserId};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Product ids across the user's delivered orders.
pub fn delivered_products(orders: &[Order]) -> HashSet<ProductId> {
    orders
        .iter()
        .filter(|order| order.is_delivered())
        .flat_map(|order| order.product_ids())
        .collect()
}

/// Delivered products minus those already reviewed.
pub fn reviewable_from(orders: &[Order], reviews: &[Review]) -> HashSet<ProductId> {
    let mut reviewable = delivered_products(orders);
    for review in reviews {
        reviewable.remove(&review.product_id);
    }
    reviewable
}

#[derive(Clone)]
pub struct EligibilityResolver {
    orders: OrderClient,
    reviews: ReviewClient,
}

impl EligibilityResolver {
    pub fn new(orders: OrderClient, reviews: ReviewClient) -> Self {
        Self { orders, reviews }
    }

    /// Products `user_id` may review right now.
    #[instrument(skip(self))]
    pub async fn reviewable_products(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<ProductId>, EligibilityError> {
        if user_id.is_blank() {
            return Err(EligibilityError::MissingUser);
        }
        let orders = self.orders.orders_for_user(user_id).await?;
        let reviews = self.reviews.reviews_for_user(user_id).await?;
        let reviewable = reviewable_from(&orders, &reviews);
        debug!(
            orders = orders.len(),
            reviews = reviews.len(),
            reviewable = reviewable.len(),
            "Eligibility computed"
        );
        Ok(reviewable)
    }

    /// Fails closed: any error means "not eligible".
    #[instrument(skip(self))]
    pub async fn can_review(&self, user_id: &UserId, product_id: ProductId) -> bool {
        match self.reviewable_products(user_id).await {
            Ok(reviewable) => reviewable.contains(&product_id),
            Err(e) => {
                warn!(error = %e, "Eligibility check failed, treating as not eligible");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::model::{
        Address, OrderId, OrderItem, OrderStatus, PaymentMethod, Rating, ReviewId,
    };
    use chrono::Utc;

    fn order(id: u32, status: OrderStatus, products: &[u32]) -> Order {
        Order {
            id: OrderId(id),
            user_id: UserId::from("u-1"),
            user_email: "u1@example.com".to_string(),
            items: products
                .iter()
                .map(|p| OrderItem {
                    product_id: ProductId(*p),
                    name: format!("Cookie {}", p),
                    price: 2.0,
                    quantity: 1,
                    image_url: String::new(),
                })
                .collect(),
            total: 2.0 * products.len() as f64,
            status,
            payment_method: PaymentMethod::Cash,
            shipping_address: Address::default(),
            billing_address: Address::default(),
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn review(product: u32) -> Review {
        Review {
            id: ReviewId(product),
            product_id: ProductId(product),
            user_id: UserId::from("u-1"),
            user_name: "Sipho".to_string(),
            user_email: "u1@example.com".to_string(),
            rating: Rating::new(4).unwrap(),
            comment: "Lovely with tea".to_string(),
            order_id: OrderId(1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_delivered_orders_count() {
        let orders = vec![
            order(1, OrderStatus::Delivered, &[1, 2]),
            order(2, OrderStatus::Shipped, &[3]),
            order(3, OrderStatus::Cancelled, &[4]),
            order(4, OrderStatus::Delivered, &[2, 5]),
        ];
        let reviewable = reviewable_from(&orders, &[review(5)]);
        assert_eq!(
            reviewable,
            HashSet::from([ProductId(1), ProductId(2)])
        );
    }

    #[test]
    fn test_everything_reviewed_is_empty() {
        let orders = vec![order(1, OrderStatus::Delivered, &[1])];
        assert!(reviewable_from(&orders, &[review(1)]).is_empty());
        assert!(reviewable_from(&[], &[]).is_empty());
    }

    #[tokio::test]
    async fn test_blank_user_is_rejected_without_store_access() {
        let orders = MockClient::<Order>::new();
        let reviews = MockClient::<Review>::new();
        let resolver = EligibilityResolver::new(
            OrderClient::new(orders.client()),
            ReviewClient::new(reviews.client(), 10),
        );

        let result = resolver.reviewable_products(&UserId::from("  ")).await;
        assert_eq!(result, Err(EligibilityError::MissingUser));
        orders.verify();
        reviews.verify();
    }

    #[tokio::test]
    async fn test_can_review_fails_closed() {
        let mut orders = MockClient::<Order>::new();
        orders.expect_list().return_ok(vec![order(1, OrderStatus::Delivered, &[7])]);
        let mut reviews = MockClient::<Review>::new();
        reviews.expect_list().return_err(FrameworkError::ActorClosed);

        let resolver = EligibilityResolver::new(
            OrderClient::new(orders.client()),
            ReviewClient::new(reviews.client(), 10),
        );

        assert!(!resolver.can_review(&UserId::from("u-1"), ProductId(7)).await);
        orders.verify();
        reviews.verify();
    }
}
