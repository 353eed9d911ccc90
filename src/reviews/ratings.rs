//! # Rating Aggregator
//!
//! Ratings are never stored. Every figure here is a fold over the review collection at
//! read time, so a committed review is reflected by the next read.
//!
//! Reads degrade instead of failing: when the review store cannot be reached the affected
//! products report the zero rating and the failure is logged.

use crate::clients::ReviewClient;
use crate::model::{ProductId, Rating, Review};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Rounds to one decimal place, halves away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Display rating of one product: mean stars rounded to one decimal, and the review count.
/// Products without reviews are `{ rating: 0, review_count: 0 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRating {
    pub rating: f64,
    pub review_count: usize,
}

/// One entry of the top-rated ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedProduct {
    pub product_id: ProductId,
    pub rating: f64,
    pub review_count: usize,
}

/// Rating plus star distribution; `distribution[0]` counts one-star reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub rating: f64,
    pub review_count: usize,
    pub distribution: [usize; 5],
}

/// Store-wide figures for the customer ratings banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_reviews: usize,
    pub average_rating: f64,
    pub five_star_count: usize,
    /// Share of reviews rated 4 or 5, as a whole percentage.
    pub satisfaction_rate: f64,
}

/// Running sum of ratings for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    sum: u64,
    count: u64,
    distribution: [usize; 5],
}

impl RatingTally {
    pub fn add(&mut self, rating: Rating) {
        let stars = rating.stars();
        self.sum += u64::from(stars);
        self.count += 1;
        self.distribution[usize::from(stars - Rating::MIN)] += 1;
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Exact mean, `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }

    /// Compares exact means without going through floating point.
    pub fn cmp_mean(&self, other: &Self) -> Ordering {
        (u128::from(self.sum) * u128::from(other.count))
            .cmp(&(u128::from(other.sum) * u128::from(self.count)))
    }

    pub fn product_rating(&self) -> ProductRating {
        ProductRating {
            rating: round_to_tenth(self.mean()),
            review_count: self.count(),
        }
    }

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary {
            rating: round_to_tenth(self.mean()),
            review_count: self.count(),
            distribution: self.distribution,
        }
    }
}

impl<'a> FromIterator<&'a Review> for RatingTally {
    fn from_iter<I: IntoIterator<Item = &'a Review>>(reviews: I) -> Self {
        let mut tally = RatingTally::default();
        for review in reviews {
            tally.add(review.rating);
        }
        tally
    }
}

/// Groups reviews by product.
pub fn tally_by_product(reviews: &[Review]) -> HashMap<ProductId, RatingTally> {
    let mut tallies: HashMap<ProductId, RatingTally> = HashMap::new();
    for review in reviews {
        tallies.entry(review.product_id).or_default().add(review.rating);
    }
    tallies
}

/// Ranks products by exact mean rating, descending. Ties go to the product with more
/// reviews, then to the lower product id.
pub fn rank(tallies: HashMap<ProductId, RatingTally>, limit: usize) -> Vec<RatedProduct> {
    let mut ranked: Vec<(ProductId, RatingTally)> = tallies.into_iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| {
        b.cmp_mean(a)
            .then(b.count.cmp(&a.count))
            .then(a_id.cmp(b_id))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|(product_id, tally)| RatedProduct {
            product_id,
            rating: round_to_tenth(tally.mean()),
            review_count: tally.count(),
        })
        .collect()
}

/// Computes display ratings from the review store.
#[derive(Clone)]
pub struct RatingAggregator {
    reviews: ReviewClient,
}

impl RatingAggregator {
    pub fn new(reviews: ReviewClient) -> Self {
        Self { reviews }
    }

    /// Rating of a single product.
    #[instrument(skip(self))]
    pub async fn product_rating(&self, product_id: ProductId) -> ProductRating {
        match self.reviews.reviews_for_product(product_id).await {
            Ok(reviews) => reviews.iter().collect::<RatingTally>().product_rating(),
            Err(e) => {
                warn!(%product_id, error = %e, "Rating read failed, using zero rating");
                ProductRating::default()
            }
        }
    }

    /// Ratings for many products at once.
    ///
    /// Every requested id is present in the result. Ids are de-duplicated and queried in
    /// chunks no wider than the review store's batch limit; a chunk whose query fails
    /// leaves its products at the zero rating.
    #[instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    pub async fn batch_ratings(&self, product_ids: &[ProductId]) -> HashMap<ProductId, ProductRating> {
        let mut ratings: HashMap<ProductId, ProductRating> = product_ids
            .iter()
            .map(|id| (*id, ProductRating::default()))
            .collect();

        let mut unique: Vec<ProductId> = ratings.keys().copied().collect();
        unique.sort();

        let chunk_size = self.reviews.batch_limit().max(1);
        for chunk in unique.chunks(chunk_size) {
            match self.reviews.reviews_for_products(chunk).await {
                Ok(reviews) => {
                    for (product_id, tally) in tally_by_product(&reviews) {
                        if let Some(slot) = ratings.get_mut(&product_id) {
                            *slot = tally.product_rating();
                        }
                    }
                }
                Err(e) => {
                    warn!(chunk = chunk.len(), error = %e, "Batch rating read failed, using zero ratings");
                }
            }
        }

        debug!(products = ratings.len(), "Batch ratings computed");
        ratings
    }

    /// The `limit` best-rated products across the whole catalog.
    #[instrument(skip(self))]
    pub async fn top_rated(&self, limit: usize) -> Vec<RatedProduct> {
        if limit == 0 {
            return Vec::new();
        }
        match self.reviews.all_reviews().await {
            Ok(reviews) => rank(tally_by_product(&reviews), limit),
            Err(e) => {
                warn!(error = %e, "Top-rated read failed, returning empty ranking");
                Vec::new()
            }
        }
    }

    /// Rating, count and star distribution for one product.
    #[instrument(skip(self))]
    pub async fn review_summary(&self, product_id: ProductId) -> ReviewSummary {
        match self.reviews.reviews_for_product(product_id).await {
            Ok(reviews) => reviews.iter().collect::<RatingTally>().summary(),
            Err(e) => {
                warn!(%product_id, error = %e, "Summary read failed, using empty summary");
                ReviewSummary::default()
            }
        }
    }

    /// Store-wide review statistics.
    #[instrument(skip(self))]
    pub async fn customer_stats(&self) -> CustomerStats {
        let reviews = match self.reviews.all_reviews().await {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!(error = %e, "Stats read failed, using empty stats");
                return CustomerStats::default();
            }
        };
        customer_stats(&reviews)
    }
}

pub fn customer_stats(reviews: &[Review]) -> CustomerStats {
    let tally: RatingTally = reviews.iter().collect();
    if tally.count == 0 {
        return CustomerStats::default();
    }
    let satisfied = tally.distribution[3] + tally.distribution[4];
    CustomerStats {
        total_reviews: tally.count(),
        average_rating: round_to_tenth(tally.mean()),
        five_star_count: tally.distribution[4],
        satisfaction_rate: (satisfied as f64 * 100.0 / tally.count as f64).round(),
    }
}
