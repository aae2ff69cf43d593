//! Analysis report generation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sonicr_core::types::{Signal, SignalType, Timeframe};

/// Signals found for one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSummary {
    pub pair: String,
    /// Candles analyzed
    pub candles: usize,
    /// Whether the history covered the startup window
    pub warmed_up: bool,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
    pub last_close: f64,
    pub entries: usize,
    pub exits: usize,
    /// Signal on the most recent candle, if any
    pub latest_signal: Option<SignalType>,
    /// Every reported signal, oldest first
    pub signals: Vec<Signal>,
}

/// A pair that could not be analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairFailure {
    pub pair: String,
    pub error: String,
}

/// Complete analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Strategy name
    pub strategy: String,
    pub timeframe: Timeframe,
    pub startup_candle_count: usize,
    pub stoploss: Decimal,
    pub generated_at: DateTime<Utc>,
    pub pairs: Vec<PairSummary>,
    pub failures: Vec<PairFailure>,
}

impl AnalysisReport {
    pub fn total_entries(&self) -> usize {
        self.pairs.iter().map(|p| p.entries).sum()
    }

    pub fn total_exits(&self) -> usize {
        self.pairs.iter().map(|p| p.exits).sum()
    }

    /// Pairs whose latest candle carries a signal.
    pub fn latest_signals(&self) -> Vec<(&str, SignalType)> {
        self.pairs
            .iter()
            .filter_map(|p| p.latest_signal.map(|s| (p.pair.as_str(), s)))
            .collect()
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                  SIGNAL ANALYSIS REPORT                    \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("STRATEGY\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Name:                {}\n", self.strategy));
        s.push_str(&format!("  Timeframe:           {}\n", self.timeframe));
        s.push_str(&format!(
            "  Startup Candles:     {}\n",
            self.startup_candle_count
        ));
        s.push_str(&format!("  Stoploss:            {}\n", self.stoploss));
        s.push('\n');

        s.push_str("PAIRS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for pair in &self.pairs {
            let latest = pair
                .latest_signal
                .map_or_else(|| "none".to_string(), |signal| signal.to_string());
            s.push_str(&format!(
                "  {:<14} candles {:>6}  entries {:>4}  exits {:>4}  latest {}\n",
                pair.pair, pair.candles, pair.entries, pair.exits, latest
            ));
            if !pair.warmed_up {
                s.push_str("                 (history shorter than startup window)\n");
            }
        }
        for failure in &self.failures {
            s.push_str(&format!("  {:<14} FAILED: {}\n", failure.pair, failure.error));
        }
        s.push('\n');

        s.push_str("TOTALS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Entry Signals:       {}\n", self.total_entries()));
        s.push_str(&format!("  Exit Signals:        {}\n", self.total_exits()));
        s.push_str(&format!(
            "  Latest-Candle Hits:  {}\n",
            self.latest_signals().len()
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export every signal to CSV.
    pub fn signals_to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["timestamp", "datetime", "pair", "signal", "close"])?;
        for signal in self.pairs.iter().flat_map(|p| &p.signals) {
            writer.write_record([
                signal.timestamp.to_string(),
                signal.datetime().to_rfc3339(),
                signal.pair.clone(),
                signal.signal_type.column().to_string(),
                signal.price.to_string(),
            ])?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
