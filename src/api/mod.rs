//! # HTTP API
//!
//! JSON endpoints over the store. Field names are camelCase.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/api/orders/create` | [`handlers::create_order`] |
//! | GET | `/api/orders/create?orderId=N` | [`handlers::get_order`] |
//! | GET | `/api/orders?userId=U` | [`handlers::order_history`] |
//! | GET | `/api/products/:id/rating` | [`handlers::product_rating`] |
//! | GET | `/api/products/:id/reviews` | [`handlers::product_reviews`] |
//! | POST | `/api/ratings/batch` | [`handlers::batch_ratings`] |
//! | GET | `/api/ratings/top?limit=N` | [`handlers::top_rated`] |
//! | GET | `/api/ratings/stats` | [`handlers::customer_stats`] |
//! | GET | `/api/users/:user_id/reviewable` | [`handlers::reviewable_products`] |
//! | POST | `/api/reviews` | [`handlers::submit_review`] |

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/orders/create",
            post(handlers::create_order).get(handlers::get_order),
        )
        .route("/api/orders", get(handlers::order_history))
        .route("/api/products/:id/rating", get(handlers::product_rating))
        .route("/api/products/:id/reviews", get(handlers::product_reviews))
        .route("/api/ratings/batch", post(handlers::batch_ratings))
        .route("/api/ratings/top", get(handlers::top_rated))
        .route("/api/ratings/stats", get(handlers::customer_stats))
        .route(
            "/api/users/:user_id/reviewable",
            get(handlers::reviewable_products),
        )
        .route("/api/reviews", post(handlers::submit_review))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
