//! Errors surfaced by the review services.
//!
//! Store errors stop here. Callers see one of the domain-shaped variants below, each of
//! which carries a distinct message for the shopper.

use crate::model::RatingError;
use crate::order_actor::OrderError;
use crate::review_actor::ReviewError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EligibilityError {
    #[error("A user id is required")]
    MissingUser,
    #[error("Store read failed: {0}")]
    Store(String),
}

impl From<OrderError> for EligibilityError {
    fn from(e: OrderError) -> Self {
        EligibilityError::Store(e.to_string())
    }
}

impl From<ReviewError> for EligibilityError {
    fn from(e: ReviewError) -> Self {
        EligibilityError::Store(e.to_string())
    }
}

/// Why a review submission was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("No rating given")]
    MissingRating,
    #[error("Rating is not a whole number")]
    FractionalRating,
    #[error("Rating outside 1-5")]
    RatingOutOfRange,
    #[error("Comment has {len} characters, minimum is {min}")]
    CommentTooShort { len: usize, min: usize },
    #[error("Comment has {len} characters, maximum is {max}")]
    CommentTooLong { len: usize, max: usize },
    #[error("No signed-in user")]
    MissingUser,
    #[error("Product already reviewed by this user")]
    AlreadyReviewed,
    #[error("No delivered order contains this product")]
    NotPurchased,
    /// Retryable; nothing was written.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<RatingError> for SubmissionError {
    fn from(e: RatingError) -> Self {
        match e {
            RatingError::Missing => SubmissionError::MissingRating,
            RatingError::Fractional => SubmissionError::FractionalRating,
            RatingError::OutOfRange => SubmissionError::RatingOutOfRange,
        }
    }
}

impl SubmissionError {
    /// Message shown to the shopper.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::MissingRating => "Please select a rating.",
            SubmissionError::FractionalRating => "Please choose a whole number of stars.",
            SubmissionError::RatingOutOfRange => "Ratings go from 1 to 5 stars.",
            SubmissionError::CommentTooShort { .. } => {
                "Your comment must be at least 10 characters long."
            }
            SubmissionError::CommentTooLong { .. } => {
                "Your comment must be at most 500 characters long."
            }
            SubmissionError::MissingUser => "Please sign in to leave a review.",
            SubmissionError::AlreadyReviewed => "You have already reviewed this product.",
            SubmissionError::NotPurchased => {
                "You can only review products from a delivered order."
            }
            SubmissionError::Storage(_) => {
                "We could not save your review. Please try again."
            }
        }
    }

    /// Input problems the shopper can fix in the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SubmissionError::MissingRating
                | SubmissionError::FractionalRating
                | SubmissionError::RatingOutOfRange
                | SubmissionError::CommentTooShort { .. }
                | SubmissionError::CommentTooLong { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_messages_are_distinct() {
        let all = [
            SubmissionError::MissingRating,
            SubmissionError::FractionalRating,
            SubmissionError::RatingOutOfRange,
            SubmissionError::CommentTooShort { len: 3, min: 10 },
            SubmissionError::CommentTooLong { len: 600, max: 500 },
            SubmissionError::MissingUser,
            SubmissionError::AlreadyReviewed,
            SubmissionError::NotPurchased,
            SubmissionError::Storage("closed".to_string()),
        ];
        let messages: HashSet<&str> = all.iter().map(SubmissionError::user_message).collect();
        assert_eq!(messages.len(), all.len());
    }
}
