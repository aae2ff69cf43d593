//! Core data types for the strategy.

mod frame;
mod metadata;
mod ohlcv;
mod signal;
mod timeframe;

pub use frame::{CandleFrame, Column, ColumnKind, Trend};
pub use metadata::PairMetadata;
pub use ohlcv::Candle;
pub use signal::{Signal, SignalType};
pub use timeframe::Timeframe;
