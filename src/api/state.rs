use crate::clients::{OrderClient, ReviewClient};
use crate::lifecycle::StoreSystem;
use crate::reviews::{EligibilityResolver, RatingAggregator, SubmissionGate};

/// Shared handler state: cheap clones of the clients and services a request needs.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub reviews: ReviewClient,
    pub eligibility: EligibilityResolver,
    pub ratings: RatingAggregator,
    pub gate: SubmissionGate,
    pub top_rated_limit: usize,
}

impl AppState {
    pub fn from_system(system: &StoreSystem) -> Self {
        Self {
            orders: system.order_client.clone(),
            reviews: system.review_client.clone(),
            eligibility: system.eligibility.clone(),
            ratings: system.ratings.clone(),
            gate: system.gate.clone(),
            top_rated_limit: system.config.top_rated_limit,
        }
    }
}
