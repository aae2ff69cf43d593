//! Analyze command implementation.

use anyhow::{bail, Context, Result};
use sonicr_config::AppConfig;
use sonicr_core::traits::{CandleSource, Notifier};
use sonicr_core::types::{Candle, Timeframe};
use sonicr_data::CsvDataSource;
use sonicr_monitor::{FanoutNotifier, LogNotifier, MemoryNotifier};
use sonicr_runner::{RunnerConfig, SignalRunner};
use sonicr_strategies::StrategyRegistry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use super::with_timeframe;
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: AppConfig) -> Result<()> {
    let strategy_name = args.strategy.clone().unwrap_or(config.strategy.name.clone());
    info!("Starting analysis for strategy: {}", strategy_name);

    let params = strategy_params(&args, &config)?;
    let pairs = if args.pairs.is_empty() {
        config.strategy.pairs.clone()
    } else {
        args.pairs.clone()
    };

    let notifications = Arc::new(MemoryNotifier::new());
    let notifier: Arc<dyn Notifier> = Arc::new(
        FanoutNotifier::new()
            .with(Arc::new(LogNotifier))
            .with(notifications.clone()),
    );

    let registry = StrategyRegistry::new();
    let strategy = registry
        .create(&strategy_name, params, pairs, notifier)
        .context("Failed to create strategy")?;

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.dir));
    if !data_path.exists() {
        bail!(
            "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files (e.g. --data ./data)",
            data_path.display()
        );
    }
    let data = load_data(&data_path, strategy.pairs(), strategy.timeframe()).await?;

    let runner = SignalRunner::new(RunnerConfig {
        include_startup_signals: args.include_startup,
    });
    let report = runner.run(strategy.as_ref(), data);

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => print!("{}", report.signals_to_csv()?),
        OutputFormat::Text => {
            println!("{}", report.summary());
            let messages = notifications.messages();
            if !messages.is_empty() {
                println!("NOTIFICATIONS");
                for message in messages {
                    println!("  {}", message);
                }
            }
        }
    }

    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write report to {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    if report.pairs.is_empty() {
        bail!("No pair could be analyzed");
    }

    Ok(())
}

/// Strategy parameters: the configuration file's `strategy.params`, replaced
/// by `--strategy-config` when given, with the timeframe override applied.
fn strategy_params(args: &AnalyzeArgs, config: &AppConfig) -> Result<serde_json::Value> {
    let params = match &args.strategy_config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: toml::Value = toml::from_str(&text)
                .with_context(|| format!("Invalid strategy config {}", path.display()))?;
            serde_json::to_value(value)?
        }
        None => config.strategy.params.clone(),
    };

    let timeframe = match &args.timeframe {
        Some(raw) => Some(raw.parse::<Timeframe>()?),
        None => config.strategy.timeframe,
    };
    with_timeframe(params, timeframe)
}

async fn load_data(
    path: &Path,
    pairs: &[String],
    timeframe: Timeframe,
) -> Result<BTreeMap<String, Vec<Candle>>> {
    let source = CsvDataSource::new(path)?;
    let mut data = BTreeMap::new();

    for pair in pairs {
        match source.load_candles(pair, timeframe).await {
            Ok(candles) => {
                data.insert(pair.clone(), candles);
            }
            Err(e) => warn!(pair = %pair, error = %e, "Skipping pair"),
        }
    }

    if data.is_empty() {
        bail!("No data loaded from {}", path.display());
    }

    info!("Loaded data for {} pairs", data.len());
    Ok(data)
}
