//! Validate configuration command.

use anyhow::Result;
use sonicr_config::{AppConfig, ConfigError};
use sonicr_core::traits::{NullNotifier, Strategy};
use sonicr_strategies::StrategyRegistry;
use std::path::Path;
use std::sync::Arc;

use super::with_timeframe;

pub async fn run(
    config_path: Option<&Path>,
    config: Result<AppConfig, ConfigError>,
) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating configuration from environment and defaults"),
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    // Building the strategy validates its parameters too
    let strategy = match build_strategy(&config) {
        Ok(strategy) => strategy,
        Err(e) => {
            println!("Strategy configuration error: {}", e);
            return Err(e);
        }
    };

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Log format: {}", config.logging.format);
    println!("Data: {}", config.data.dir);
    println!("Strategy: {}", strategy.name());
    println!("Pairs: {}", strategy.pairs().join(", "));
    println!("Timeframe: {}", strategy.timeframe());
    println!("Stoploss: {}", strategy.stoploss());

    Ok(())
}

/// Build the configured strategy the way `analyze` does without flags.
fn build_strategy(config: &AppConfig) -> Result<Box<dyn Strategy>> {
    let params = with_timeframe(config.strategy.params.clone(), config.strategy.timeframe)?;
    let strategy = StrategyRegistry::new().create(
        &config.strategy.name,
        params,
        config.strategy.pairs.clone(),
        Arc::new(NullNotifier),
    )?;
    Ok(strategy)
}
