use std::sync::Arc;

use anyhow::Context;
use chain_assistant_backend::{config::AppConfig, routes, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if config.etherscan_api_key.is_none() {
        tracing::warn!("ETHERSCAN_API_KEY is not set; Etherscan requests will be unauthenticated");
    }

    let state = Arc::new(AppState::from_config(&config));
    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("🚀 chain assistant running at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
