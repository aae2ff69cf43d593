//! Moving average indicators.

use sonicr_core::traits::Indicator;

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay with
/// multiplier `2 / (period + 1)`. The first value is the simple average of
/// the first `period` inputs, so output starts at input index `period - 1`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self {
            period,
            multiplier,
            name: format!("ema{}", period),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        // Seed with SMA
        let seed: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result.push(seed);

        let mut ema = seed;
        for &price in &data[self.period..] {
            ema = (price - ema) * self.multiplier + ema;
            result.push(ema);
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        &self.name
    }
}
