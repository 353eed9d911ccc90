//! # Review services
//!
//! Business rules for reviews, built on the typed store clients:
//!
//! - [`EligibilityResolver`] - which products a user may review.
//! - [`RatingAggregator`] - ratings derived from the review collection at read time.
//! - [`SubmissionGate`] - validates and commits new reviews.

pub mod eligibility;
pub mod error;
pub mod gate;
pub mod ratings;

pub use eligibility::EligibilityResolver;
pub use error::{EligibilityError, SubmissionError};
pub use gate::{ReviewSubmission, SubmissionGate, SubmissionReceipt};
pub use ratings::{CustomerStats, ProductRating, RatedProduct, RatingAggregator, ReviewSummary};
