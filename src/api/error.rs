use crate::checkout::CheckoutError;
use crate::order_actor::OrderError;
use crate::reviews::SubmissionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors returned by HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// A store failed; the client may retry.
    #[error("{0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                json!({ "error": self.to_string(), "message": detail })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<CheckoutError> for ApiError {
    fn from(e: CheckoutError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Checkout(e) => e.into(),
            OrderError::ValidationError(msg) => ApiError::BadRequest(msg),
            OrderError::NotFound(_) => ApiError::NotFound("Order not found".to_string()),
            OrderError::ActorCommunicationError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        let message = e.user_message().to_string();
        match e {
            e if e.is_validation() => ApiError::BadRequest(message),
            SubmissionError::MissingUser => ApiError::Unauthorized(message),
            SubmissionError::AlreadyReviewed => ApiError::Conflict(message),
            SubmissionError::NotPurchased => ApiError::Forbidden(message),
            _ => ApiError::Unavailable(message),
        }
    }
}
