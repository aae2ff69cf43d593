//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sonicr")]
#[command(author, version, about = "SonicR trend-following signal analysis")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SONICR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze candle history and report entry/exit signals
    Analyze(AnalyzeArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Strategy to run (defaults to strategy.name from the configuration)
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Pairs to analyze (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub pairs: Vec<String>,

    /// Data file or directory of per-pair CSV files
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Timeframe, e.g. 4h
    #[arg(short, long)]
    pub timeframe: Option<String>,

    /// Strategy configuration file (TOML)
    #[arg(long)]
    pub strategy_config: Option<PathBuf>,

    /// Also report signals raised inside the startup window
    #[arg(long)]
    pub include_startup: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}
