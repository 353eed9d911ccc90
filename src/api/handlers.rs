//! Request handlers. Each one is a thin adapter from HTTP to a client or service call.

use super::error::ApiError;
use super::state::AppState;
use crate::checkout::CheckoutRequest;
use crate::framework::ActorClient;
use crate::model::{Order, OrderId, ProductId, Review, UserId};
use crate::reviews::{
    CustomerStats, ProductRating, RatedProduct, ReviewSubmission, ReviewSummary,
    SubmissionReceipt,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub success: bool,
    pub order_id: OrderId,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OrderFound {
    pub success: bool,
    pub order: Order,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLookup {
    pub order_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OrderHistory {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRatingsRequest {
    pub product_ids: Vec<ProductId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopRatedQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reviewable {
    pub product_ids: Vec<ProductId>,
}

fn malformed(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Accepts `3` or `order_3`.
fn parse_order_id(raw: &str) -> Option<OrderId> {
    let digits = raw.trim();
    let digits = digits.strip_prefix("order_").unwrap_or(digits);
    digits.parse::<u32>().ok().map(OrderId)
}

/// `POST /api/orders/create`
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<OrderCreated>, ApiError> {
    let Json(request) = payload.map_err(malformed)?;
    let order_id = state.orders.place_order(request).await?;
    info!(%order_id, "Order created");
    Ok(Json(OrderCreated {
        success: true,
        order_id,
        message: "Order created successfully".to_string(),
    }))
}

/// `GET /api/orders/create?orderId=N`
pub async fn get_order(
    State(state): State<AppState>,
    Query(lookup): Query<OrderLookup>,
) -> Result<Json<OrderFound>, ApiError> {
    let raw = lookup
        .order_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Order ID is required".to_string()))?;
    let order_id = parse_order_id(&raw)
        .ok_or_else(|| ApiError::BadRequest("Order ID is invalid".to_string()))?;

    let order = state
        .orders
        .get(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;
    Ok(Json(OrderFound {
        success: true,
        order,
    }))
}

/// `GET /api/orders?userId=U`
pub async fn order_history(
    State(state): State<AppState>,
    Query(query): Query<OrderHistoryQuery>,
) -> Result<Json<OrderHistory>, ApiError> {
    let user_id = query
        .user_id
        .map(UserId::from)
        .filter(|id| !id.is_blank())
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;
    let orders = state.orders.orders_for_user(&user_id).await?;
    Ok(Json(OrderHistory { orders }))
}

/// `GET /api/products/:id/rating`
pub async fn product_rating(
    State(state): State<AppState>,
    Path(product_id): Path<u32>,
) -> Json<ProductRating> {
    Json(state.ratings.product_rating(ProductId(product_id)).await)
}

/// `GET /api/products/:id/reviews`, newest first. A failed read shows no reviews.
pub async fn product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<u32>,
) -> Json<ProductReviews> {
    let product_id = ProductId(product_id);
    let reviews = match state.reviews.reviews_for_product(product_id).await {
        Ok(reviews) => reviews,
        Err(e) => {
            warn!(%product_id, error = %e, "Review read failed, showing none");
            Vec::new()
        }
    };
    let summary = state.ratings.review_summary(product_id).await;
    Json(ProductReviews { reviews, summary })
}

/// `POST /api/ratings/batch`
pub async fn batch_ratings(
    State(state): State<AppState>,
    payload: Result<Json<BatchRatingsRequest>, JsonRejection>,
) -> Result<Json<BTreeMap<ProductId, ProductRating>>, ApiError> {
    let Json(request) = payload.map_err(malformed)?;
    let ratings = state.ratings.batch_ratings(&request.product_ids).await;
    Ok(Json(ratings.into_iter().collect()))
}

/// `GET /api/ratings/top?limit=N`
pub async fn top_rated(
    State(state): State<AppState>,
    Query(query): Query<TopRatedQuery>,
) -> Json<Vec<RatedProduct>> {
    let limit = query.limit.unwrap_or(state.top_rated_limit);
    Json(state.ratings.top_rated(limit).await)
}

/// `GET /api/ratings/stats`
pub async fn customer_stats(State(state): State<AppState>) -> Json<CustomerStats> {
    Json(state.ratings.customer_stats().await)
}

/// `GET /api/users/:user_id/reviewable`. Fails closed: errors yield an empty list.
pub async fn reviewable_products(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Reviewable> {
    let user_id = UserId::from(user_id);
    let mut product_ids: Vec<ProductId> =
        match state.eligibility.reviewable_products(&user_id).await {
            Ok(products) => products.into_iter().collect(),
            Err(e) => {
                warn!(%user_id, error = %e, "Eligibility failed, reporting nothing reviewable");
                Vec::new()
            }
        };
    product_ids.sort();
    Json(Reviewable { product_ids })
}

/// `POST /api/reviews`
pub async fn submit_review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), ApiError> {
    let Json(submission) = payload.map_err(malformed)?;
    let receipt = state.gate.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_id() {
        assert_eq!(parse_order_id("7"), Some(OrderId(7)));
        assert_eq!(parse_order_id("order_12"), Some(OrderId(12)));
        assert_eq!(parse_order_id("review_1"), None);
        assert_eq!(parse_order_id(""), None);
    }
}
