//! SonicR signal analysis CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sonicr_config::load_config;
use sonicr_monitor::setup_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());

    // Command-line flags win over the logging section
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let level = cli
        .log_level
        .map_or_else(|| logging.level.clone(), |l| l.as_str().to_string());
    let _guard = setup_logging(
        &level,
        cli.json_logs || logging.is_json(),
        logging.file.as_deref().map(Path::new),
    );

    match cli.command {
        Commands::Analyze(args) => {
            let config = config.context("Failed to load configuration")?;
            cli::commands::analyze::run(args, config).await
        }
        Commands::Strategies => cli::commands::strategies::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref(), config).await,
    }
}
