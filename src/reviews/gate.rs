//! # Review Submission Gate
//!
//! The only write path for reviews. A submission moves through:
//!
//! 1. **Validating** - rating and comment checks, no store access.
//! 2. **Checking** - re-reads the user's orders and reviews; rejects duplicates and
//!    products without a delivered order.
//! 3. **Locating order** - picks the newest delivered order containing the product as
//!    provenance.
//! 4. **Committing** - a single insert. The review store re-checks uniqueness and
//!    provenance inside its own loop, so a concurrent submission that slipped past
//!    step 2 is still turned away here.
//! 5. **Committed** - returns the new review id, the provenance order and the product's
//!    recomputed rating.
//!
//! Any read or write failure is reported as [`SubmissionError::Storage`]; nothing is
//! written in that case.

use super::error::SubmissionError;
use super::ratings::{ProductRating, RatingAggregator};
use crate::clients::{OrderClient, ReviewClient};
use crate::model::{OrderId, ProductId, Rating, ReviewCreate, ReviewId, UserId};
use crate::review_actor::{ReviewError, COMMENT_MAX_CHARS, COMMENT_MIN_CHARS};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// A review as submitted from the product page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub product_id: ProductId,
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    /// Unset star pickers submit nothing or `0`.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub review_id: ReviewId,
    pub order_id: OrderId,
    pub product_rating: ProductRating,
}

/// Input checks. Returns the rating and the trimmed comment.
pub fn validate_submission(
    rating: Option<f64>,
    comment: &str,
) -> Result<(Rating, String), SubmissionError> {
    let rating = Rating::try_from(rating.unwrap_or(0.0))?;

    let comment = comment.trim();
    let len = comment.chars().count();
    if len < COMMENT_MIN_CHARS {
        return Err(SubmissionError::CommentTooShort {
            len,
            min: COMMENT_MIN_CHARS,
        });
    }
    if len > COMMENT_MAX_CHARS {
        return Err(SubmissionError::CommentTooLong {
            len,
            max: COMMENT_MAX_CHARS,
        });
    }
    Ok((rating, comment.to_string()))
}

#[derive(Clone)]
pub struct SubmissionGate {
    orders: OrderClient,
    reviews: ReviewClient,
    ratings: RatingAggregator,
}

impl SubmissionGate {
    pub fn new(orders: OrderClient, reviews: ReviewClient, ratings: RatingAggregator) -> Self {
        Self {
            orders,
            reviews,
            ratings,
        }
    }

    #[instrument(skip(self, submission), fields(user = %submission.user_id, product = %submission.product_id))]
    pub async fn submit(
        &self,
        submission: ReviewSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let (rating, comment) = validate_submission(submission.rating, &submission.comment)?;
        if submission.user_id.is_blank() {
            return Err(SubmissionError::MissingUser);
        }
        let user_id = submission.user_id;
        let product_id = submission.product_id;

        let order_id = self.locate_order(&user_id, product_id).await?;

        let params = ReviewCreate {
            product_id,
            user_id,
            user_name: submission.user_name,
            user_email: submission.user_email,
            rating,
            comment,
            order_id,
        };
        let review_id = self.reviews.create_review(params).await.map_err(|e| match e {
            ReviewError::AlreadyReviewed(_) => SubmissionError::AlreadyReviewed,
            ReviewError::Ineligible { .. } => SubmissionError::NotPurchased,
            other => {
                warn!(error = %other, "Review commit failed");
                SubmissionError::Storage(other.to_string())
            }
        })?;

        let product_rating = self.ratings.product_rating(product_id).await;
        info!(%review_id, %order_id, rating = product_rating.rating, "Review committed");
        Ok(SubmissionReceipt {
            review_id,
            order_id,
            product_rating,
        })
    }

    /// Re-checks eligibility against current store state and returns the provenance
    /// order.
    async fn locate_order(
        &self,
        user_id: &UserId,
        product_id: ProductId,
    ) -> Result<OrderId, SubmissionError> {
        let storage = |e: &dyn std::error::Error| {
            warn!(error = %e, "Eligibility re-check failed");
            SubmissionError::Storage(e.to_string())
        };

        let reviewed = self
            .reviews
            .has_reviewed(user_id, product_id)
            .await
            .map_err(|e| storage(&e))?;
        if reviewed {
            return Err(SubmissionError::AlreadyReviewed);
        }

        let delivered = self
            .orders
            .delivered_orders_for_user(user_id)
            .await
            .map_err(|e| storage(&e))?;
        delivered
            .iter()
            .find(|order| order.contains_product(product_id))
            .map(|order| order.id)
            .ok_or(SubmissionError::NotPurchased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::model::{Address, Order, OrderItem, OrderStatus, PaymentMethod, Review, ReviewQuery};
    use chrono::Utc;

    fn delivered(id: u32, product: u32) -> Order {
        Order {
            id: OrderId(id),
            user_id: UserId::from("u-1"),
            user_email: "u-1@example.com".to_string(),
            items: vec![OrderItem {
                product_id: ProductId(product),
                name: "Shortbread".to_string(),
                price: 4.0,
                quantity: 1,
                image_url: String::new(),
            }],
            total: 4.0,
            status: OrderStatus::Delivered,
            payment_method: PaymentMethod::Cash,
            shipping_address: Address::default(),
            billing_address: Address::default(),
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn gate(orders: &MockClient<Order>, reviews: &MockClient<Review>) -> SubmissionGate {
        let reviews = ReviewClient::new(reviews.client(), 10);
        SubmissionGate::new(
            OrderClient::new(orders.client()),
            reviews.clone(),
            RatingAggregator::new(reviews),
        )
    }

    fn submission() -> ReviewSubmission {
        ReviewSubmission {
            product_id: ProductId(7),
            user_id: UserId::from("u-1"),
            user_name: "Thandi".to_string(),
            user_email: "u-1@example.com".to_string(),
            rating: Some(5.0),
            comment: "Crunchy edges, soft middle.".to_string(),
        }
    }

    /// Fails if the review mock received a request nobody scripted: that panics its
    /// task and closes the channel.
    async fn assert_no_stray_writes(reviews: &mut MockClient<Review>) {
        reviews.expect_list().return_ok(Vec::new());
        let all = reviews.client().list(ReviewQuery::All).await;
        assert!(matches!(all, Ok(ref reviews) if reviews.is_empty()));
        reviews.verify();
    }

    #[test]
    fn test_validation_checks_rating_first() {
        assert_eq!(
            validate_submission(None, "short"),
            Err(SubmissionError::MissingRating)
        );
        assert_eq!(
            validate_submission(Some(4.5), "Really great cookie!"),
            Err(SubmissionError::FractionalRating)
        );
        assert_eq!(
            validate_submission(Some(7.0), "Really great cookie!"),
            Err(SubmissionError::RatingOutOfRange)
        );
    }

    #[test]
    fn test_comment_is_trimmed_before_length_check() {
        assert_eq!(
            validate_submission(Some(5.0), "   short tx   "),
            Err(SubmissionError::CommentTooShort { len: 8, min: 10 })
        );
        let (_, comment) = validate_submission(Some(5.0), "  Really great cookie!\n").unwrap();
        assert_eq!(comment, "Really great cookie!");

        let long = "a".repeat(501);
        assert_eq!(
            validate_submission(Some(5.0), &long),
            Err(SubmissionError::CommentTooLong { len: 501, max: 500 })
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Ten characters, more than ten bytes.
        assert!(validate_submission(Some(3.0), "délicieux!").is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_check_failure_is_storage_error() {
        let orders = MockClient::<Order>::new();
        let mut reviews = MockClient::<Review>::new();
        reviews.expect_list().return_err(FrameworkError::ActorClosed);

        let result = gate(&orders, &reviews).submit(submission()).await;
        assert!(matches!(result, Err(SubmissionError::Storage(_))));
        orders.verify();
        assert_no_stray_writes(&mut reviews).await;
    }

    #[tokio::test]
    async fn test_order_read_failure_is_storage_error() {
        let mut orders = MockClient::<Order>::new();
        orders.expect_list().return_err(FrameworkError::ActorDropped);
        let mut reviews = MockClient::<Review>::new();
        reviews.expect_list().return_ok(Vec::new());

        let result = gate(&orders, &reviews).submit(submission()).await;
        assert!(matches!(result, Err(SubmissionError::Storage(_))));
        orders.verify();
        assert_no_stray_writes(&mut reviews).await;
    }

    #[tokio::test]
    async fn test_commit_failure_is_storage_error() {
        let mut orders = MockClient::<Order>::new();
        orders.expect_list().return_ok(vec![delivered(3, 7)]);
        let mut reviews = MockClient::<Review>::new();
        reviews.expect_list().return_ok(Vec::new());
        reviews.expect_create().return_err(FrameworkError::ActorClosed);

        let result = gate(&orders, &reviews).submit(submission()).await;
        assert!(matches!(result, Err(SubmissionError::Storage(_))));
        orders.verify();
        // No rating recomputation after a failed commit.
        assert_no_stray_writes(&mut reviews).await;
    }
}
