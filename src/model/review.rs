/// A customer's review of one product, tied to the delivered order that allowed it.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
/// The store enforces at most one review per `(user_id, product_id)`.
use crate::model::{OrderId, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub u32);

impl From<u32> for ReviewId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "review_{}", self.0)
    }
}

/// Star rating, always a whole number from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("Rating is required")]
    Missing,
    #[error("Rating must be a whole number of stars")]
    Fractional,
    #[error("Rating must be between 1 and 5")]
    OutOfRange,
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, RatingError> {
        match stars {
            0 => Err(RatingError::Missing),
            Self::MIN..=Self::MAX => Ok(Self(stars)),
            _ => Err(RatingError::OutOfRange),
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Rating::new(stars)
    }
}

/// Form input arrives as a JSON number; `0` is how an unset star picker submits.
impl TryFrom<f64> for Rating {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            return Err(RatingError::Missing);
        }
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(RatingError::Fractional);
        }
        if !(f64::from(Self::MIN)..=f64::from(Self::MAX)).contains(&value) {
            return Err(RatingError::OutOfRange);
        }
        Ok(Self(value as u8))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub rating: Rating,
    pub comment: String,
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a review. `created_at` is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCreate {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub rating: Rating,
    pub comment: String,
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewQuery {
    All,
    ByProduct(ProductId),
    ByUser(UserId),
    ByUserAndProduct(UserId, ProductId),
    /// Batch lookup; the store caps how many ids one query may carry.
    ProductIn(Vec<ProductId>),
}
