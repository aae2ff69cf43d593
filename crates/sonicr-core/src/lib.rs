//! Core types and traits for the SonicR strategy.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle, CandleFrame, Timeframe)
//! - Trend labels and trading signals
//! - The plugin contract a host uses to drive a strategy
//! - Traits for indicators, candlestick patterns, candle sources and notification sinks

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DataError, FrameError, IndicatorError, StrategyError};
pub use types::*;
pub use traits::*;
