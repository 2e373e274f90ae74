//! services/web/src/bin/web.rs

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_lib::{
    adapters::{RemoteAuthAdapter, RemoteSummaryAdapter},
    config::Config,
    error::WebError,
    web::{router, state::AppState},
};

#[tokio::main]
async fn main() -> Result<(), WebError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Gateways to the Remote API ---
    // One client, and so one connection pool, shared by both gateways.
    let client = reqwest::Client::builder().build()?;
    info!("Remote API at {}", config.api_base_url);
    let auth = Arc::new(RemoteAuthAdapter::new(
        client.clone(),
        config.api_base_url.clone(),
    ));
    let summarizer = Arc::new(RemoteSummaryAdapter::new(
        client,
        config.api_base_url.clone(),
    ));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        auth,
        summarizer,
    });

    // --- 4. Create the Web Router & Start the Server ---
    let app = router(app_state);
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
