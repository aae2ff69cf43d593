//! Strategy plugin contract.

use rust_decimal::Decimal;

use crate::error::StrategyError;
use crate::types::{CandleFrame, PairMetadata, Timeframe};

/// Version of the callback contract implemented by this crate.
pub const INTERFACE_VERSION: u32 = 3;

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Core strategy trait.
///
/// A host drives a strategy once per decision cycle and per pair by
/// calling the three `populate_*` callbacks in order. Each callback takes
/// the frame by value and hands back the augmented frame; the host then
/// reads the `enter_long` / `exit_long` columns. Order execution, sizing
/// and stoploss handling stay on the host side.
pub trait Strategy: Send + Sync {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }

    /// Callback contract version the strategy was written against.
    fn interface_version(&self) -> u32 {
        INTERFACE_VERSION
    }

    /// Timeframe of the candles the strategy expects.
    fn timeframe(&self) -> Timeframe;

    /// Whether the strategy may open short positions.
    fn can_short(&self) -> bool {
        false
    }

    /// Candles the host must load before signals are meaningful.
    fn startup_candle_count(&self) -> usize;

    /// Hard stoploss as a ratio of the entry price (e.g. `-0.05`).
    fn stoploss(&self) -> Decimal;

    /// Additional (pair, timeframe) combinations the host should cache.
    fn informative_pairs(&self) -> Vec<(String, Timeframe)> {
        Vec::new()
    }

    /// Pairs this strategy instance is configured for.
    fn pairs(&self) -> &[String];

    /// Add indicator columns to the frame.
    fn populate_indicators(
        &self,
        frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError>;

    /// Add trend labels and the `enter_long` column.
    fn populate_entry_trend(
        &self,
        frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError>;

    /// Add the `exit_long` column.
    fn populate_exit_trend(
        &self,
        frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError>;

    /// Run the three callbacks in host order.
    fn analyze(
        &self,
        frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError> {
        let frame = self.populate_indicators(frame, metadata)?;
        let frame = self.populate_entry_trend(frame, metadata)?;
        self.populate_exit_trend(frame, metadata)
    }

    /// Check if enough candles are available for the startup window.
    fn is_warmed_up(&self, candles_available: usize) -> bool {
        candles_available >= self.startup_candle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Candle;
    use rust_decimal_macros::dec;

    struct TestStrategy {
        pairs: Vec<String>,
    }

    impl Strategy for TestStrategy {
        fn name(&self) -> &str {
            "test"
        }

        fn timeframe(&self) -> Timeframe {
            Timeframe::Hour1
        }

        fn startup_candle_count(&self) -> usize {
            20
        }

        fn stoploss(&self) -> Decimal {
            dec!(-0.10)
        }

        fn pairs(&self) -> &[String] {
            &self.pairs
        }

        fn populate_indicators(
            &self,
            mut frame: CandleFrame,
            _metadata: &PairMetadata,
        ) -> Result<CandleFrame, StrategyError> {
            let doubled = frame.close().iter().map(|c| c * 2.0).collect();
            frame.insert_float("double_close", doubled)?;
            Ok(frame)
        }

        fn populate_entry_trend(
            &self,
            mut frame: CandleFrame,
            _metadata: &PairMetadata,
        ) -> Result<CandleFrame, StrategyError> {
            // Depends on the indicator step having run first
            let mask: Vec<bool> = frame
                .floats("double_close")?
                .iter()
                .map(|v| *v > 3.0)
                .collect();
            frame.set_flag_where("enter_long", &mask)?;
            Ok(frame)
        }

        fn populate_exit_trend(
            &self,
            mut frame: CandleFrame,
            _metadata: &PairMetadata,
        ) -> Result<CandleFrame, StrategyError> {
            let mask = vec![false; frame.len()];
            frame.set_flag_where("exit_long", &mask)?;
            Ok(frame)
        }
    }

    fn frame() -> CandleFrame {
        CandleFrame::from_candles(&[
            Candle::new(1, 1.0, 1.0, 1.0, 1.0, 0.0),
            Candle::new(2, 2.0, 2.0, 2.0, 2.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_attributes() {
        let strategy = TestStrategy {
            pairs: vec!["BTC/USDT".to_string()],
        };

        assert_eq!(strategy.interface_version(), 3);
        assert!(!strategy.can_short());
        assert!(strategy.informative_pairs().is_empty());
        assert!(!strategy.is_warmed_up(19));
        assert!(strategy.is_warmed_up(20));
    }

    #[test]
    fn test_analyze_runs_callbacks_in_order() {
        let strategy = TestStrategy { pairs: vec![] };
        let metadata = PairMetadata::new("BTC/USDT", Timeframe::Hour1);

        let frame = strategy.analyze(frame(), &metadata).unwrap();

        assert_eq!(frame.flags("enter_long").unwrap(), &[false, true]);
        assert_eq!(frame.flags("exit_long").unwrap(), &[false, false]);
    }

    #[test]
    fn test_callback_errors_propagate() {
        let strategy = TestStrategy { pairs: vec![] };
        let metadata = PairMetadata::new("BTC/USDT", Timeframe::Hour1);

        let err = strategy.populate_entry_trend(frame(), &metadata).unwrap_err();
        assert!(matches!(err, StrategyError::Frame(_)));
    }
}
