//! Candle data sources.

mod csv_source;

pub use csv_source::CsvDataSource;

use sonicr_core::error::DataError;
use sonicr_core::traits::CandleSource;
use sonicr_core::types::{Candle, Timeframe};

/// Load candles for `pair` from a CSV file or a directory of per-pair files.
pub async fn load_csv(
    path: &str,
    pair: &str,
    timeframe: Timeframe,
) -> Result<Vec<Candle>, DataError> {
    let source = CsvDataSource::new(path)?;
    source.load_candles(pair, timeframe).await
}
