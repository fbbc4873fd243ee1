//! easyslip CLI entry point.

mod cli;
mod input;

use clap::Parser;
use cli::Cli;
use easyslip_node::{SlipVerifier, StaticCredentials};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Build configuration
    let config = cli.to_config()?;

    // Initialize tracing; stdout is reserved for the routed outputs
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(&config.log_level))
        .init();

    info!("easyslip v{}", env!("CARGO_PKG_VERSION"));

    let items = input::load_items(&cli.input)?;

    let credentials = Arc::new(StaticCredentials::new(cli.access_token.clone()));
    let verifier = SlipVerifier::http(&config.api, credentials)?;

    let report = verifier.run(&items, config.run_options()).await?;
    let rendered = serde_json::to_string_pretty(&report.outputs)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Wrote routed outputs to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
