//! AdVault gateway binary.

use advault_gateway::{serve, AppState, ServerConfig};
use advault_ledger::{LedgerConfig, StellarCli};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(LedgerConfig::from_env()?);
    info!(
        network = %config.network,
        bin = %config.bin,
        admin_guard = config.admin_api_key.is_some(),
        "ledger configuration loaded"
    );

    let runner = Arc::new(StellarCli::new(&config.bin));
    let state = AppState::new(config, runner);

    serve(state, ServerConfig::from_env()).await?;
    Ok(())
}
