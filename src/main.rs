//! Devery Registry Inspector
//!
//! Prints a registry summary and checks the item addresses given as arguments.

use alloy::primitives::Address;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devery_client::{Config, DeploymentRegistry, DeveryRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Parse items before touching the network
    let items = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<Address>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut deployments = DeploymentRegistry::bundled();
    if let Some(dir) = &config.artifacts_dir {
        let loaded = deployments.load_artifacts_dir(dir)?;
        tracing::info!(dir = %dir.display(), loaded, "Loaded deployment artifacts");
    }

    let registry = DeveryRegistry::connect(config.connection(), &deployments).await?;

    let summary = registry.summary().await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    for item in items {
        let result = registry.check(item).await?;
        let output = serde_json::json!({ "item": item, "marked": result.is_marked(), "result": result });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
