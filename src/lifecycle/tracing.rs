//! # Logging
//!
//! [`setup_tracing`] installs one compact `fmt` subscriber for the whole process. The
//! filter comes from `RUST_LOG`; when it is unset the store logs at `info` and the
//! HTTP layer's `TraceLayer` spans at `debug`.
//!
//! Store events carry an `entity_type` field instead of a module path, so targets are
//! hidden. Client and service methods open `#[instrument]` spans, which the compact
//! format prints inline:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Updated entity_type="Order" id=order_1
//! INFO submit{user=u-1 product=product_3}: Created entity_type="Review" id=review_1 size=1
//! INFO submit{user=u-1 product=product_3}: Review committed review_id=review_1 order_id=order_1 rating=5.0
//! ```
//!
//! At `debug` the same submission also shows the reads the gate makes and the review
//! store's provenance check:
//!
//! ```text
//! DEBUG List entity_type="Review" query=ByUserAndProduct(UserId("u-1"), ProductId(3)) matched=0
//! DEBUG List entity_type="Order" query=ByUserAndStatus(UserId("u-1"), Delivered) matched=1
//! DEBUG Get entity_type="Order" id=order_1 found=true
//! DEBUG Provenance verified review=review_1 order=order_1
//! ```
//!
//! Rating and eligibility reads that degrade to defaults are logged at `warn`.

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Installs the global subscriber. Call once, before the store system starts.
pub fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
