use crate::clients::{CartClient, OrderClient, ProductClient, ReviewClient};
use crate::config::Config;
use crate::reviews::{EligibilityResolver, RatingAggregator, SubmissionGate};
use crate::{cart_actor, order_actor, product_actor, review_actor};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator for the store.
///
/// `StoreSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping every store actor
/// - **Dependency Wiring**: The review store validates provenance through an `OrderClient`
/// - **Service Assembly**: Building the review services on top of the store clients
///
/// # Architecture
///
/// - **Order Store**: checkout orders (no dependencies)
/// - **Product Store**: the catalog (no dependencies)
/// - **Cart Store**: anonymous and account carts (no dependencies)
/// - **Review Store**: reviews; context is an `OrderClient`
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::new(&Config::default());
///
/// let order_id = system.order_client.place_order(request).await?;
/// let receipt = system.gate.submit(submission).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub order_client: OrderClient,
    pub review_client: ReviewClient,
    pub product_client: ProductClient,
    pub cart_client: CartClient,

    pub eligibility: EligibilityResolver,
    pub ratings: RatingAggregator,
    pub gate: SubmissionGate,

    pub config: Config,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Creates every store actor, wires dependencies and spawns each actor in its own
    /// Tokio task. Must be called from within a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        // 1. Create actors (no dependencies)
        let (order_actor, order_client) = order_actor::new(config.channel_buffer);
        let (review_actor, review_client) =
            review_actor::new(config.channel_buffer, config.review_batch_limit);
        let (product_actor, product_client) = product_actor::new(config.channel_buffer);
        let (cart_actor, cart_client) = cart_actor::new(config.channel_buffer);

        // 2. Start actors with injected context
        let order_handle = tokio::spawn(order_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(()));
        // Review needs orders to check provenance (Context = OrderClient)
        let review_handle = tokio::spawn(review_actor.run(order_client.clone()));

        // 3. Services over the clients
        let eligibility = EligibilityResolver::new(order_client.clone(), review_client.clone());
        let ratings = RatingAggregator::new(review_client.clone());
        let gate = SubmissionGate::new(order_client.clone(), review_client.clone(), ratings.clone());

        info!(?config, "Store system started");

        Self {
            order_client,
            review_client,
            product_client,
            cart_client,
            eligibility,
            ratings,
            gate,
            config: config.clone(),
            handles: vec![review_handle, cart_handle, product_handle, order_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping every client closes the actors' channels; each actor drains and exits.
    /// The review actor holds an `OrderClient`, so the order actor stops only after it.
    /// Clones handed out elsewhere (e.g. to the HTTP router) must be dropped first or
    /// this waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        let Self {
            order_client,
            review_client,
            product_client,
            cart_client,
            eligibility,
            ratings,
            gate,
            handles,
            ..
        } = self;
        drop((eligibility, ratings, gate));
        drop((order_client, review_client, product_client, cart_client));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
