//! Trading strategy implementations.
//!
//! This crate provides the SonicR strategy: an EMA34/EMA89 trend filter
//! with RSI context and bullish candlestick confirmation for entries, and
//! an RSI overbought crossover for exits. Strategies are created by name
//! through the [`StrategyRegistry`].

mod registry;
mod sonicr;

pub use registry::{StrategyInfo, StrategyRegistry};
pub use sonicr::{columns, BullishPattern, SonicRConfig, SonicRStrategy};
