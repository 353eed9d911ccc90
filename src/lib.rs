//! # Makoti Cookies store
//!
//! Back end of a small cookie storefront. Orders, products, carts and reviews each live
//! in their own in-process store; the interesting part is the review logic on top:
//! who may review what, how ratings are derived, and how a review gets written.
//!
//! ## Design
//!
//! ### Stores are actors
//! Every collection is owned by a [`ResourceActor`](framework::ResourceActor) running in
//! its own Tokio task. Requests are processed one at a time, so an actor can check a
//! rule and act on it without a lock and without a race. The review store relies on
//! this: its one-review-per-user-and-product key and its provenance check happen inside
//! the loop, right before the insert.
//!
//! ### Ratings are derived
//! No rating is ever stored. [`RatingAggregator`](reviews::RatingAggregator) folds the
//! review collection on every read.
//!
//! ### Errors stop at the service boundary
//! Each store has its own `thiserror` enum; the review services translate those into
//! domain errors ([`SubmissionError`](reviews::SubmissionError),
//! [`EligibilityError`](reviews::EligibilityError)) and the HTTP layer maps those onto
//! status codes.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic actor, client and entity trait. Written once, used by every store.
//!
//! ### 2. The Stores ([`order_actor`], [`review_actor`], [`product_actor`], [`cart_actor`])
//! `ActorEntity` implementations with their errors and actions.
//!
//! ### 3. The Interface ([`clients`])
//! Typed clients per store, e.g. [`ReviewClient`](clients::ReviewClient).
//!
//! ### 4. The Rules ([`reviews`], [`checkout`])
//! Eligibility, ratings, the submission gate, and checkout validation.
//!
//! ### 5. The Orchestrator ([`lifecycle`]) and the Edge ([`api`], [`config`])
//! [`StoreSystem`](lifecycle::StoreSystem) wires everything together; the axum router
//! exposes it over HTTP.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info MAKOTI_PORT=3000 cargo run
//! ```
//!
//! ## Testing
//!
//! Use [`framework::mock`] to isolate a client or service from the actors behind it;
//! `tests/` drives the full system.

pub mod api;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod review_actor;
pub mod reviews;
