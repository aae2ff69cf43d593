//! Trading signals emitted by a strategy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of signal found on a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    EnterLong,
    ExitLong,
}

impl SignalType {
    /// Name of the frame column that carries this signal.
    pub fn column(&self) -> &'static str {
        match self {
            SignalType::EnterLong => "enter_long",
            SignalType::ExitLong => "exit_long",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalType::EnterLong => "Enter Long",
            SignalType::ExitLong => "Exit Long",
        };
        write!(f, "{}", s)
    }
}

/// A signal raised on a specific candle of a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Instrument identifier
    pub pair: String,
    /// Entry or exit
    pub signal_type: SignalType,
    /// Close price of the candle that raised the signal
    pub price: f64,
    /// Candle timestamp (Unix milliseconds)
    pub timestamp: i64,
}

impl Signal {
    pub fn new(pair: impl Into<String>, signal_type: SignalType, price: f64, timestamp: i64) -> Self {
        Self {
            pair: pair.into(),
            signal_type,
            price,
            timestamp,
        }
    }

    /// Candle time as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }

    /// Human-readable message sent to notification sinks.
    ///
    /// The price keeps its decimal point even when whole, e.g. `42000.0`.
    pub fn message(&self) -> String {
        format!(
            "Signal: {} for {} with previous close price {:?}",
            self.signal_type, self.pair, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_message() {
        let signal = Signal::new("BTC/USDT", SignalType::EnterLong, 42_000.5, 0);
        assert_eq!(
            signal.message(),
            "Signal: Enter Long for BTC/USDT with previous close price 42000.5"
        );
    }

    #[test]
    fn test_whole_price_keeps_decimal_point() {
        let signal = Signal::new("BTC/USDT", SignalType::EnterLong, 42_000.0, 0);
        assert_eq!(
            signal.message(),
            "Signal: Enter Long for BTC/USDT with previous close price 42000.0"
        );
    }

    #[test]
    fn test_signal_columns() {
        assert_eq!(SignalType::EnterLong.column(), "enter_long");
        assert_eq!(SignalType::ExitLong.column(), "exit_long");
    }
}
