//! Signal analysis engine.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use sonicr_core::error::StrategyError;
use sonicr_core::traits::Strategy;
use sonicr_core::types::{Candle, CandleFrame, PairMetadata, Signal, SignalType};

use crate::report::{AnalysisReport, PairFailure, PairSummary};

/// Runner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Report signals raised inside the startup window too
    pub include_startup_signals: bool,
}

/// Runs a strategy over candle history and collects the signals it raises.
pub struct SignalRunner {
    config: RunnerConfig,
}

impl SignalRunner {
    /// Create a new signal runner.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Analyze one pair.
    pub fn analyze_pair(
        &self,
        strategy: &dyn Strategy,
        pair: &str,
        candles: &[Candle],
    ) -> Result<PairSummary, StrategyError> {
        let frame = CandleFrame::from_candles(candles)?;

        let startup = strategy.startup_candle_count();
        if !strategy.is_warmed_up(frame.len()) {
            warn!(
                pair,
                candles = frame.len(),
                required = startup,
                "Fewer candles than the startup window; signals may be unreliable"
            );
        }

        let metadata = PairMetadata::new(pair, strategy.timeframe());
        let frame = strategy.analyze(frame, &metadata)?;

        let first_row = if self.config.include_startup_signals {
            0
        } else {
            startup.min(frame.len())
        };

        let mut signals = Vec::new();
        for row in first_row..frame.len() {
            for signal_type in [SignalType::EnterLong, SignalType::ExitLong] {
                if frame.flag_at(signal_type.column(), row) {
                    signals.push(Signal::new(
                        pair,
                        signal_type,
                        frame.close()[row],
                        frame.timestamps()[row],
                    ));
                }
            }
        }

        let last = frame.last_row().ok_or(StrategyError::InsufficientData {
            required: 1,
            available: 0,
        })?;
        // An entry on the latest candle takes precedence over an exit
        let latest_signal = [SignalType::EnterLong, SignalType::ExitLong]
            .into_iter()
            .find(|signal_type| frame.flag_at(signal_type.column(), last));

        let summary = PairSummary {
            pair: pair.to_string(),
            candles: frame.len(),
            warmed_up: strategy.is_warmed_up(frame.len()),
            first_timestamp: frame.timestamps()[0],
            last_timestamp: frame.timestamps()[last],
            last_close: frame.close()[last],
            entries: signals
                .iter()
                .filter(|s| s.signal_type == SignalType::EnterLong)
                .count(),
            exits: signals
                .iter()
                .filter(|s| s.signal_type == SignalType::ExitLong)
                .count(),
            latest_signal,
            signals,
        };

        info!(
            pair,
            entries = summary.entries,
            exits = summary.exits,
            latest = ?summary.latest_signal,
            "Analyzed pair"
        );

        Ok(summary)
    }

    /// Analyze every pair in `data`, in pair-name order.
    ///
    /// A pair that fails is recorded in the report and does not stop the run.
    pub fn run(
        &self,
        strategy: &dyn Strategy,
        data: BTreeMap<String, Vec<Candle>>,
    ) -> AnalysisReport {
        let mut pairs = Vec::new();
        let mut failures = Vec::new();

        for (pair, candles) in &data {
            match self.analyze_pair(strategy, pair, candles) {
                Ok(summary) => pairs.push(summary),
                Err(e) => {
                    warn!(pair = %pair, error = %e, "Pair analysis failed");
                    failures.push(PairFailure {
                        pair: pair.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        AnalysisReport {
            strategy: strategy.name().to_string(),
            timeframe: strategy.timeframe(),
            startup_candle_count: strategy.startup_candle_count(),
            stoploss: strategy.stoploss(),
            generated_at: Utc::now(),
            pairs,
            failures,
        }
    }
}

impl Default for SignalRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sonicr_core::types::Timeframe;
    use sonicr_monitor::MemoryNotifier;
    use sonicr_strategies::{SonicRConfig, SonicRStrategy};
    use std::sync::Arc;

    const FOUR_HOURS: i64 = 14_400_000;

    /// Enters on every candle whose close ends in .5, exits on .25.
    struct FractionStrategy;

    impl Strategy for FractionStrategy {
        fn name(&self) -> &str {
            "fraction"
        }

        fn timeframe(&self) -> Timeframe {
            Timeframe::Hour4
        }

        fn startup_candle_count(&self) -> usize {
            3
        }

        fn stoploss(&self) -> Decimal {
            dec!(-0.05)
        }

        fn pairs(&self) -> &[String] {
            &[]
        }

        fn populate_indicators(
            &self,
            frame: CandleFrame,
            _metadata: &PairMetadata,
        ) -> Result<CandleFrame, StrategyError> {
            Ok(frame)
        }

        fn populate_entry_trend(
            &self,
            mut frame: CandleFrame,
            _metadata: &PairMetadata,
        ) -> Result<CandleFrame, StrategyError> {
            let mask: Vec<bool> = frame.close().iter().map(|c| c.fract() == 0.5).collect();
            frame.set_flag_where("enter_long", &mask)?;
            Ok(frame)
        }

        fn populate_exit_trend(
            &self,
            mut frame: CandleFrame,
            _metadata: &PairMetadata,
        ) -> Result<CandleFrame, StrategyError> {
            let mask: Vec<bool> = frame.close().iter().map(|c| c.fract() == 0.25).collect();
            frame.set_flag_where("exit_long", &mask)?;
            Ok(frame)
        }
    }

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Candle::new(i as i64 * FOUR_HOURS, *c, c + 1.0, c - 1.0, *c, 10.0))
            .collect()
    }

    #[test]
    fn test_signals_after_startup_window() {
        let runner = SignalRunner::default();
        let data = candles(&[100.5, 101.0, 102.5, 103.0, 104.5, 105.25]);

        let summary = runner.analyze_pair(&FractionStrategy, "BTC/USDT", &data).unwrap();

        assert_eq!(summary.candles, 6);
        assert!(summary.warmed_up);
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.exits, 1);
        assert_eq!(summary.signals[0].timestamp, 4 * FOUR_HOURS);
        assert_eq!(summary.signals[0].price, 104.5);
        assert_eq!(summary.signals[1].signal_type, SignalType::ExitLong);
        assert_eq!(summary.latest_signal, Some(SignalType::ExitLong));
        assert_eq!(summary.last_close, 105.25);
    }

    #[test]
    fn test_include_startup_signals() {
        let runner = SignalRunner::new(RunnerConfig {
            include_startup_signals: true,
        });
        let data = candles(&[100.5, 101.0, 102.5, 103.0]);

        let summary = runner.analyze_pair(&FractionStrategy, "BTC/USDT", &data).unwrap();

        assert_eq!(summary.entries, 2);
        assert_eq!(summary.latest_signal, None);
    }

    #[test]
    fn test_short_history_still_analyzed() {
        let runner = SignalRunner::default();
        let data = candles(&[100.0, 101.5]);

        let summary = runner.analyze_pair(&FractionStrategy, "BTC/USDT", &data).unwrap();

        assert!(!summary.warmed_up);
        assert!(summary.signals.is_empty());
        assert_eq!(summary.latest_signal, Some(SignalType::EnterLong));
    }

    #[test]
    fn test_unordered_candles_rejected() {
        let runner = SignalRunner::default();
        let mut data = candles(&[100.0, 101.0, 102.0]);
        data.swap(0, 2);

        let result = runner.analyze_pair(&FractionStrategy, "BTC/USDT", &data);
        assert!(matches!(result, Err(StrategyError::Frame(_))));
    }

    #[test]
    fn test_run_collects_failures() {
        let runner = SignalRunner::default();
        let mut data = BTreeMap::new();
        data.insert("BTC/USDT".to_string(), candles(&[100.0, 101.0, 102.0, 103.5]));
        data.insert("ETH/USDT".to_string(), vec![]);

        let report = runner.run(&FractionStrategy, data);

        assert_eq!(report.strategy, "fraction");
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].pair, "BTC/USDT");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].pair, "ETH/USDT");
        assert_eq!(report.total_entries(), 1);
    }

    #[test]
    fn test_sonicr_entry_on_latest_candle() {
        let notifier = Arc::new(MemoryNotifier::new());
        let strategy = SonicRStrategy::new(
            SonicRConfig {
                pairs: vec!["BTC/USDT".to_string()],
                ..Default::default()
            },
            notifier.clone(),
        );

        let mut data = Vec::new();
        let mut close = 100.0;
        for i in 0..240 {
            let open = close;
            close += if i % 2 == 0 { 1.0 } else { -0.8 };
            data.push(Candle::new(
                i as i64 * FOUR_HOURS,
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                10.0,
            ));
        }
        data.push(Candle::new(240 * FOUR_HOURS, close, close + 1.0, close - 0.9, close + 0.1, 10.0));

        let summary = SignalRunner::default()
            .analyze_pair(&strategy, "BTC/USDT", &data)
            .unwrap();

        assert_eq!(summary.latest_signal, Some(SignalType::EnterLong));
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.exits, 0);
        assert_eq!(notifier.len(), 1);
        assert_eq!(notifier.signals()[0], summary.signals[0]);
    }
}
