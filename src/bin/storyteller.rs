use anyhow::Context;
use tracing::Level;

use storyteller::config::Config;
use storyteller::infer::{Client, Transport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if config.debug { Level::DEBUG } else { Level::INFO })
        .init();
    tracing::debug!(?config, "Configuration loaded");

    let transport = Transport::select(&config).context("Failed to set up completion transport")?;
    tracing::info!(model = &*config.model, "Using {} completion transport", transport.name());

    let client = Client::new(transport, config.model.clone());
    storyteller::web::serve(config.port, client).await
}
