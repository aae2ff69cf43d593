//! Configuration structures.

use config::ConfigError;
use serde::{Deserialize, Serialize};
use sonicr_core::types::Timeframe;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub strategy: StrategySettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Message(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        if self.strategy.name.trim().is_empty() {
            return Err(ConfigError::Message("strategy.name must not be empty".into()));
        }
        if self.data.dir.trim().is_empty() {
            return Err(ConfigError::Message("data.dir must not be empty".into()));
        }
        if !self.strategy.params.is_null() && !self.strategy.params.is_object() {
            return Err(ConfigError::Message("strategy.params must be a table".into()));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "sonicr".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Strategy selection and parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    /// Registry name of the strategy
    pub name: String,
    /// Pairs to analyze; overrides pairs inside `params` when non-empty
    pub pairs: Vec<String>,
    /// Candle timeframe; overrides the strategy's own when set
    pub timeframe: Option<Timeframe>,
    /// Strategy-specific configuration, passed to the registry as JSON
    pub params: serde_json::Value,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            name: "sonicr".to_string(),
            pairs: vec![],
            timeframe: None,
            params: serde_json::Value::Object(Default::default()),
        }
    }
}

/// Candle data location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV file, or directory of per-pair CSV files
    pub dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}
