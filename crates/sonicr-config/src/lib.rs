//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DataSettings, LoggingConfig, StrategySettings};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Variables named `SONICR__<SECTION>__<KEY>` override file values, e.g.
/// `SONICR__LOGGING__LEVEL=debug`. `SONICR__STRATEGY__PAIRS` takes a
/// comma-separated list.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_environment(path, environment())
}

/// `SONICR__` environment overrides, read from the process environment.
fn environment() -> Environment {
    Environment::with_prefix("SONICR")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("strategy.pairs")
        .try_parsing(true)
}

fn load_with_environment(
    path: Option<&Path>,
    environment: Environment,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder.add_source(environment).build()?;

    let config: AppConfig = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonicr_core::types::Timeframe;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn environment_from(vars: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_load_file() {
        let file = write_config(
            r#"
[app]
name = "sonicr-test"

[logging]
level = "debug"
format = "json"

[strategy]
name = "sonicr"
pairs = ["BTC/USDT", "ETH/USDT"]
timeframe = "1h"

[strategy.params]
rsi_exit_level = 75.0
require_rsi_trend = false
"#,
        );

        let config = load_with_environment(Some(file.path()), environment_from(&[])).unwrap();

        assert_eq!(config.app.name, "sonicr-test");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
        assert_eq!(config.strategy.pairs, vec!["BTC/USDT", "ETH/USDT"]);
        assert_eq!(config.strategy.timeframe, Some(Timeframe::Hour1));
        assert_eq!(config.strategy.params["rsi_exit_level"], 75.0);
        assert_eq!(config.strategy.params["require_rsi_trend"], false);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/sonicr.toml");
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        assert!(load_with_environment(Some(file.path()), environment_from(&[])).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("[data]\ndir = \"from-file\"\n");

        let config = load_with_environment(
            Some(file.path()),
            environment_from(&[("SONICR__DATA__DIR", "from-env")]),
        )
        .unwrap();

        assert_eq!(config.data.dir, "from-env");
    }

    #[test]
    fn test_environment_pairs_list() {
        let config = load_with_environment(
            None,
            environment_from(&[("SONICR__STRATEGY__PAIRS", "BTC/USDT,ETH/USDT")]),
        )
        .unwrap();

        assert_eq!(config.strategy.pairs, vec!["BTC/USDT", "ETH/USDT"]);
    }
}
