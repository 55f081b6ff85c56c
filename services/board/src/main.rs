use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use board::api::{ApiClient, ApiConfig};
use board::cache::WorkCache;
use board::sweep::DeadlineSweep;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting board client");

    let config = ApiConfig::from_env()?;
    let client = Arc::new(ApiClient::new(config.base_url.clone())?);

    client.login(&config.email, &config.password).await?;
    info!("Logged in as {}", config.email);

    let cache = Arc::new(WorkCache::new());
    let sweep = DeadlineSweep::new(Arc::clone(&client), Arc::clone(&cache)).spawn();
    info!("Deadline sweep running");

    tokio::signal::ctrl_c().await?;

    sweep.stop();
    client.logout().await?;
    info!("Board client stopped");

    Ok(())
}
