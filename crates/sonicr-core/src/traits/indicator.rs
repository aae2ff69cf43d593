//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators over a single price series.
///
/// Indicators process price data and produce derived values
/// useful for trading decisions.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// # Returns
    /// One value per input point from the first fully warmed-up point
    /// onwards, i.e. `data.len() - lookback()` values (empty when there is
    /// not enough data).
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Number of leading input points that produce no output.
    fn lookback(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate values aligned with the input, `NaN` during warm-up.
    ///
    /// The result always has `data.len()` entries, so it can be stored
    /// directly as a frame column.
    fn calculate_aligned(&self, data: &[f64]) -> Vec<f64> {
        let values = self.calculate(data);
        let mut aligned = vec![f64::NAN; data.len().saturating_sub(values.len())];
        aligned.extend(values);
        aligned
    }
}

/// Candlestick pattern recognizer over OHLC data.
///
/// Output is aligned with the input: one integer per candle, `100` for a
/// bullish match, `-100` for a bearish match, `0` otherwise (including the
/// warm-up candles).
pub trait CandlePattern: Send + Sync {
    /// Recognize the pattern on every candle.
    fn recognize(
        &self,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<i32>, IndicatorError>;

    /// Number of leading candles that can never match.
    fn lookback(&self) -> usize;

    /// Column name for the pattern output, e.g. `CDLDOJI`.
    fn name(&self) -> &str;
}
