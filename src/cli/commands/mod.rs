//! CLI command implementations.

pub mod analyze;
pub mod strategies;
pub mod validate;

use anyhow::{bail, Result};
use sonicr_core::types::Timeframe;

/// Strategy parameters with the timeframe override applied.
///
/// Missing parameters become an empty table.
pub(crate) fn with_timeframe(
    mut params: serde_json::Value,
    timeframe: Option<Timeframe>,
) -> Result<serde_json::Value> {
    if params.is_null() {
        params = serde_json::Value::Object(Default::default());
    }

    if let Some(timeframe) = timeframe {
        let Some(table) = params.as_object_mut() else {
            bail!("Strategy parameters must be a table");
        };
        table.insert("timeframe".to_string(), serde_json::to_value(timeframe)?);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timeframe_override_replaces_param() {
        let params = json!({ "timeframe": "4h", "rsi_exit_level": 75.0 });

        let params = with_timeframe(params, Some(Timeframe::Hour1)).unwrap();

        assert_eq!(params["timeframe"], "1h");
        assert_eq!(params["rsi_exit_level"], 75.0);
    }

    #[test]
    fn test_no_override_keeps_params() {
        let params = with_timeframe(json!({ "timeframe": "4h" }), None).unwrap();
        assert_eq!(params["timeframe"], "4h");

        let params = with_timeframe(serde_json::Value::Null, None).unwrap();
        assert_eq!(params, json!({}));
    }

    #[test]
    fn test_override_on_non_table_rejected() {
        assert!(with_timeframe(json!([1, 2]), Some(Timeframe::Hour1)).is_err());
    }
}
