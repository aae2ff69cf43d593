//! Strategy registry for loading strategies by name.

use crate::{SonicRConfig, SonicRStrategy};
use serde::{Deserialize, Serialize};
use sonicr_core::{
    error::StrategyError,
    traits::{Notifier, Strategy, StrategyConfig},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy name
    pub name: String,
    /// Strategy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry for available strategies.
pub struct StrategyRegistry {
    strategies: HashMap<String, StrategyInfo>,
}

impl StrategyRegistry {
    /// Create a new strategy registry with all built-in strategies.
    pub fn new() -> Self {
        let mut strategies = HashMap::new();

        strategies.insert(
            "sonicr".to_string(),
            StrategyInfo {
                name: "SonicR".to_string(),
                description: "EMA34/EMA89 trend context, RSI band and bullish candle confirmation"
                    .to_string(),
                default_config: serde_json::to_value(SonicRConfig::default()).unwrap_or_default(),
            },
        );

        Self { strategies }
    }

    /// List all available strategies.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get strategy info by name.
    pub fn get(&self, name: &str) -> Option<&StrategyInfo> {
        self.strategies.get(name)
    }

    /// Check if a strategy exists.
    pub fn exists(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Get all strategy names.
    pub fn names(&self) -> Vec<&String> {
        self.strategies.keys().collect()
    }

    /// Create a strategy instance from configuration.
    ///
    /// A non-empty `pairs` list replaces the pairs in `config`. Missing
    /// config keys take their defaults.
    pub fn create(
        &self,
        name: &str,
        config: serde_json::Value,
        pairs: Vec<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        match name {
            "sonicr" => {
                let mut config: SonicRConfig = serde_json::from_value(config)
                    .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
                if !pairs.is_empty() {
                    config.pairs = pairs;
                }
                config.validate()?;
                Ok(Box::new(SonicRStrategy::new(config, notifier)))
            }
            _ => Err(StrategyError::NotFound(name.to_string())),
        }
    }

    /// Create a strategy with default configuration.
    pub fn create_default(
        &self,
        name: &str,
        pairs: Vec<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        let info = self
            .get(name)
            .ok_or_else(|| StrategyError::NotFound(name.to_string()))?;
        self.create(name, info.default_config.clone(), pairs, notifier)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
