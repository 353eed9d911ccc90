mod common;

use common::{order_with_status, submission};
use makoti_store::clients::{OrderClient, ReviewClient};
use makoti_store::config::Config;
use makoti_store::framework::mock::MockClient;
use makoti_store::lifecycle::StoreSystem;
use makoti_store::model::{Order, OrderStatus, ProductId, Review, UserId};
use makoti_store::reviews::{RatingAggregator, SubmissionError, SubmissionGate};

/// Delivered order, valid review: the review is committed against that order and the
/// product stops being reviewable.
#[tokio::test]
async fn test_delivered_purchase_can_be_reviewed_once() {
    let system = StoreSystem::new(&Config::default());
    let user = UserId::from("u-1");

    let order_id =
        order_with_status(&system.order_client, "u-1", &[1, 2], OrderStatus::Delivered).await;
    assert!(system.eligibility.can_review(&user, ProductId(1)).await);

    let receipt = system
        .gate
        .submit(submission("u-1", 1, 5.0, "Really great cookie!"))
        .await
        .expect("Submission should be accepted");
    assert_eq!(receipt.order_id, order_id);
    assert_eq!(receipt.product_rating.rating, 5.0);
    assert_eq!(receipt.product_rating.review_count, 1);

    assert!(!system.eligibility.can_review(&user, ProductId(1)).await);
    assert!(system.eligibility.can_review(&user, ProductId(2)).await);

    let again = system
        .gate
        .submit(submission("u-1", 1, 4.0, "Still a great cookie"))
        .await;
    assert_eq!(again, Err(SubmissionError::AlreadyReviewed));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_undelivered_order_does_not_qualify() {
    let system = StoreSystem::new(&Config::default());

    order_with_status(&system.order_client, "u-1", &[3], OrderStatus::Shipped).await;

    let result = system
        .gate
        .submit(submission("u-1", 3, 5.0, "Really great cookie!"))
        .await;
    assert_eq!(result, Err(SubmissionError::NotPurchased));
    assert!(system
        .review_client
        .reviews_for_product(ProductId(3))
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_another_users_order_does_not_qualify() {
    let system = StoreSystem::new(&Config::default());

    order_with_status(&system.order_client, "u-2", &[4], OrderStatus::Delivered).await;

    let result = system
        .gate
        .submit(submission("u-1", 4, 4.0, "Lovely and chewy."))
        .await;
    assert_eq!(result, Err(SubmissionError::NotPurchased));

    system.shutdown().await.unwrap();
}

/// Input errors are reported before any store is consulted.
#[tokio::test]
async fn test_invalid_input_never_reaches_the_stores() {
    let order_mock = MockClient::<Order>::new();
    let review_mock = MockClient::<Review>::new();
    let orders = OrderClient::new(order_mock.client());
    let reviews = ReviewClient::new(review_mock.client(), 10);
    let gate = SubmissionGate::new(orders, reviews.clone(), RatingAggregator::new(reviews));

    let short = gate.submit(submission("u-1", 1, 5.0, "short txt")).await;
    assert_eq!(
        short,
        Err(SubmissionError::CommentTooShort { len: 9, min: 10 })
    );

    let half_star = gate
        .submit(submission("u-1", 1, 3.5, "Really great cookie!"))
        .await;
    assert_eq!(half_star, Err(SubmissionError::FractionalRating));

    let anonymous = gate.submit(submission("  ", 1, 5.0, "Really great cookie!")).await;
    assert_eq!(anonymous, Err(SubmissionError::MissingUser));

    order_mock.verify();
    review_mock.verify();
}

#[tokio::test]
async fn test_concurrent_duplicates_store_one_review() {
    let system = StoreSystem::new(&Config::default());

    order_with_status(&system.order_client, "u-1", &[5], OrderStatus::Delivered).await;

    let mut handles = vec![];
    for i in 0..8 {
        let gate = system.gate.clone();
        handles.push(tokio::spawn(async move {
            gate.submit(submission("u-1", 5, 5.0, &format!("Great cookie, take {}", i)))
                .await
        }));
    }

    let mut accepted = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(SubmissionError::AlreadyReviewed) => duplicates += 1,
            Err(other) => panic!("Unexpected rejection: {:?}", other),
        }
    }
    assert_eq!(accepted, 1, "Exactly one submission should win");
    assert_eq!(duplicates, 7);

    let stored = system
        .review_client
        .reviews_for_product(ProductId(5))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ratings_follow_committed_reviews() {
    let config = Config {
        review_batch_limit: 2,
        ..Config::default()
    };
    let system = StoreSystem::new(&config);

    for (user, rating) in [("u-1", 5.0), ("u-2", 4.0), ("u-3", 4.0)] {
        order_with_status(&system.order_client, user, &[1], OrderStatus::Delivered).await;
        system
            .gate
            .submit(submission(user, 1, rating, "Really great cookie!"))
            .await
            .unwrap();
    }
    order_with_status(&system.order_client, "u-1", &[2], OrderStatus::Delivered).await;
    system
        .gate
        .submit(submission("u-1", 2, 3.0, "Good, a bit too sweet"))
        .await
        .unwrap();

    let single = system.ratings.product_rating(ProductId(1)).await;
    assert_eq!(single.rating, 4.3);
    assert_eq!(single.review_count, 3);

    // Five ids against a batch limit of two: every id still comes back.
    let ids: Vec<ProductId> = (1..=5).map(ProductId).collect();
    let batch = system.ratings.batch_ratings(&ids).await;
    assert_eq!(batch.len(), 5);
    assert_eq!(batch[&ProductId(1)], single);
    assert_eq!(batch[&ProductId(2)].rating, 3.0);
    assert_eq!(batch[&ProductId(4)].review_count, 0);
    assert_eq!(batch[&ProductId(4)].rating, 0.0);

    let top = system.ratings.top_rated(5).await;
    let order: Vec<ProductId> = top.iter().map(|p| p.product_id).collect();
    assert_eq!(order, vec![ProductId(1), ProductId(2)]);

    let summary = system.ratings.review_summary(ProductId(1)).await;
    assert_eq!(summary.distribution, [0, 0, 0, 2, 1]);

    let stats = system.ratings.customer_stats().await;
    assert_eq!(stats.total_reviews, 4);
    assert_eq!(stats.average_rating, 4.0);
    assert_eq!(stats.five_star_count, 1);
    assert_eq!(stats.satisfaction_rate, 75.0);

    system.shutdown().await.unwrap();
}
