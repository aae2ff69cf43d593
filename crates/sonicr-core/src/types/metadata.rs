//! Per-pair metadata handed to every strategy callback.

use serde::{Deserialize, Serialize};

use super::Timeframe;

/// Metadata record describing the instrument a frame belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMetadata {
    /// Instrument identifier, e.g. `BTC/USDT`
    pub pair: String,
    /// Timeframe of the candles in the frame
    pub timeframe: Timeframe,
}

impl PairMetadata {
    pub fn new(pair: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            pair: pair.into(),
            timeframe,
        }
    }
}
