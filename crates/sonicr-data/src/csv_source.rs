//! CSV data source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use sonicr_core::error::DataError;
use sonicr_core::traits::CandleSource;
use sonicr_core::types::{Candle, Timeframe};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", default)]
    close: Option<f64>,
    /// Yahoo exports carry both columns; only used when `Close` is absent.
    #[serde(rename = "Adj Close", alias = "adj_close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// CSV data source for historical candles.
///
/// `path` is either a single CSV file, used for every pair, or a directory
/// holding one file per pair (`BTC_USDT.csv`, `BTC_USDT-4h.csv`, any case).
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// File that holds candles for `pair` on `timeframe`.
    pub fn resolve(&self, pair: &str, timeframe: Timeframe) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let stem = pair.replace(['/', ':'], "_");
        let candidates = [
            format!("{}-{}.csv", stem, timeframe),
            format!("{}.csv", stem),
            format!("{}-{}.csv", stem.to_lowercase(), timeframe),
            format!("{}.csv", stem.to_lowercase()),
        ];

        candidates
            .iter()
            .map(|name| self.path.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| DataError::PairNotFound(pair.to_string()))
    }

    /// Load candles from a specific path.
    fn load_from_path(&self, path: &Path) -> Result<Vec<Candle>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut candles = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let timestamp = parse_timestamp(&record.date)?;
            let close = record.close.or(record.adj_close).ok_or_else(|| {
                DataError::ParseError(format!("No close price for {}", record.date))
            })?;

            candles.push(Candle::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                close,
                record.volume,
            ));
        }

        candles.sort_by_key(|c| c.timestamp);

        let before = candles.len();
        candles.dedup_by_key(|c| c.timestamp);
        if candles.len() < before {
            warn!(
                path = %path.display(),
                dropped = before - candles.len(),
                "Dropped candles with duplicate timestamps"
            );
        }

        Ok(candles)
    }
}

#[async_trait]
impl CandleSource for CsvDataSource {
    async fn load_candles(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>, DataError> {
        let path = self.resolve(pair, timeframe)?;
        let candles = self.load_from_path(&path)?;
        if candles.is_empty() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        debug!(pair, path = %path.display(), candles = candles.len(), "Loaded candles");
        Ok(candles)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.timestamp_millis());
    }

    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
