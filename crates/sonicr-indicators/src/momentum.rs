//! Momentum indicators.

use sonicr_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// The first value appears at input index `period`: average gain and loss
/// start as the simple mean of the first `period` changes and are then
/// smoothed with Wilder's method. A window with neither gains nor losses
/// reads 0.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn value(avg_gain: f64, avg_loss: f64) -> f64 {
        let total = avg_gain + avg_loss;
        if total == 0.0 {
            0.0
        } else {
            100.0 * avg_gain / total
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(data.len() - self.period);

        // Initial averages over the first `period` changes
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=self.period {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                avg_gain += change;
            } else {
                avg_loss -= change;
            }
        }
        avg_gain /= period_f64;
        avg_loss /= period_f64;
        result.push(Self::value(avg_gain, avg_loss));

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for i in (self.period + 1)..data.len() {
            let change = data[i] - data[i - 1];
            let (gain, loss) = if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            };
            avg_gain = (avg_gain * (period_f64 - 1.0) + gain) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + loss) / period_f64;
            result.push(Self::value(avg_gain, avg_loss));
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "rsi"
    }
}
