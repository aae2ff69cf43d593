//! Candle source trait definition.

use crate::error::DataError;
use crate::types::{Candle, Timeframe};
use async_trait::async_trait;

/// Trait for historical candle sources.
///
/// Fetching candles is the host's job; strategies only ever see the
/// resulting [`CandleFrame`](crate::types::CandleFrame).
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Load candles for a pair.
    ///
    /// # Returns
    /// Candles ordered from oldest to newest
    async fn load_candles(&self, pair: &str, timeframe: Timeframe) -> Result<Vec<Candle>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Vec<Candle>);

    #[async_trait]
    impl CandleSource for StaticSource {
        async fn load_candles(&self, pair: &str, _timeframe: Timeframe) -> Result<Vec<Candle>, DataError> {
            if pair != "BTC/USDT" {
                return Err(DataError::PairNotFound(pair.to_string()));
            }
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    #[tokio::test]
    async fn test_source_as_trait_object() {
        let source: Box<dyn CandleSource> =
            Box::new(StaticSource(vec![Candle::new(1, 1.0, 2.0, 0.5, 1.5, 10.0)]));

        let candles = source.load_candles("BTC/USDT", Timeframe::Hour4).await.unwrap();
        assert_eq!(candles.len(), 1);
        assert!(matches!(
            source.load_candles("ETH/USDT", Timeframe::Hour4).await,
            Err(DataError::PairNotFound(_))
        ));
    }
}
