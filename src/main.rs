//! # Makoti Cookies store server
//!
//! Loads [`Config`] from the environment, starts the [`StoreSystem`], and serves the
//! HTTP API until Ctrl-C. On shutdown the router is drained first, then every store
//! actor.

use makoti_store::api::{self, AppState};
use makoti_store::config::Config;
use makoti_store::lifecycle::{setup_tracing, StoreSystem};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::load()?;
    let system = StoreSystem::new(&config);
    let app = api::router(AppState::from_system(&system));

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            // The router holds client clones; the actors stop only once it is gone.
            drop(app);
            system.shutdown().await?;
            return Err(e.into());
        }
    };
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
