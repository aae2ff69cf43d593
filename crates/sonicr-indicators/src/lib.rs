//! Technical indicators and candlestick patterns.
//!
//! This crate provides the indicator functions the SonicR strategy delegates to:
//! - Exponential moving average (EMA)
//! - Relative strength index (RSI)
//! - Series crossover detection
//! - Candlestick pattern recognition (doji, hammer, inverted hammer, engulfing)
//!
//! Outputs follow TA-Lib conventions (seeding, lookback, pattern scores) so
//! values line up with what charting tools report for the same candles.

pub mod crossover;
pub mod momentum;
pub mod moving_average;
pub mod patterns;

pub use crossover::{crossed_above, crossed_above_value, crossed_below, crossed_below_value};
pub use momentum::Rsi;
pub use moving_average::Ema;
pub use patterns::{CandleSetting, Doji, Engulfing, Hammer, InvertedHammer, RangeKind};
