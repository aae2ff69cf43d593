//! Core traits for the strategy plugin contract.

mod data_source;
mod indicator;
mod notifier;
mod strategy;

pub use data_source::CandleSource;
pub use indicator::{CandlePattern, Indicator};
pub use notifier::{Notifier, NullNotifier};
pub use strategy::{Strategy, StrategyConfig, INTERFACE_VERSION};
