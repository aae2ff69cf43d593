//! Candlestick pattern recognition.
//!
//! Patterns compare the shape of a candle against averages of recent
//! candles. Each comparison uses a [`CandleSetting`]: which measure of a
//! candle to average, over how many preceding candles, and a scaling
//! factor. Defaults match TA-Lib's candle settings.

use serde::{Deserialize, Serialize};
use sonicr_core::error::IndicatorError;
use sonicr_core::traits::CandlePattern;

/// Which measure of a candle a setting averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    /// |close - open|
    RealBody,
    /// high - low
    HighLow,
    /// upper shadow + lower shadow
    Shadows,
}

/// Reference average used by a pattern rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSetting {
    pub kind: RangeKind,
    /// Preceding candles to average; 0 means "the candle itself".
    pub period: usize,
    pub factor: f64,
}

impl CandleSetting {
    pub const fn new(kind: RangeKind, period: usize, factor: f64) -> Self {
        Self {
            kind,
            period,
            factor,
        }
    }

    /// Real body is doji-sized: 10% of the average high-low range.
    pub const BODY_DOJI: CandleSetting = CandleSetting::new(RangeKind::HighLow, 10, 0.1);
    /// Real body is short: shorter than the average real body.
    pub const BODY_SHORT: CandleSetting = CandleSetting::new(RangeKind::RealBody, 10, 1.0);
    /// Shadow is long: longer than the candle's own real body.
    pub const SHADOW_LONG: CandleSetting = CandleSetting::new(RangeKind::RealBody, 0, 1.0);
    /// Shadow is very short: under 10% of the average high-low range.
    pub const SHADOW_VERY_SHORT: CandleSetting = CandleSetting::new(RangeKind::HighLow, 10, 0.1);
    /// Prices are near: within 20% of the average high-low range.
    pub const NEAR: CandleSetting = CandleSetting::new(RangeKind::HighLow, 5, 0.2);
}

/// Borrowed OHLC columns with the per-candle measures patterns need.
struct Ohlc<'a> {
    open: &'a [f64],
    high: &'a [f64],
    low: &'a [f64],
    close: &'a [f64],
}

impl<'a> Ohlc<'a> {
    fn new(
        open: &'a [f64],
        high: &'a [f64],
        low: &'a [f64],
        close: &'a [f64],
    ) -> Result<Self, IndicatorError> {
        let len = open.len();
        if high.len() != len || low.len() != len || close.len() != len {
            return Err(IndicatorError::MismatchedInputs);
        }
        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    fn len(&self) -> usize {
        self.open.len()
    }

    fn real_body(&self, i: usize) -> f64 {
        (self.close[i] - self.open[i]).abs()
    }

    fn upper_shadow(&self, i: usize) -> f64 {
        self.high[i] - self.close[i].max(self.open[i])
    }

    fn lower_shadow(&self, i: usize) -> f64 {
        self.close[i].min(self.open[i]) - self.low[i]
    }

    fn color(&self, i: usize) -> i32 {
        if self.close[i] >= self.open[i] {
            1
        } else {
            -1
        }
    }

    fn measure(&self, kind: RangeKind, i: usize) -> f64 {
        match kind {
            RangeKind::RealBody => self.real_body(i),
            RangeKind::HighLow => self.high[i] - self.low[i],
            RangeKind::Shadows => self.upper_shadow(i) + self.lower_shadow(i),
        }
    }

    /// Setting average relative to candle `i`. Requires `i >= setting.period`.
    fn average(&self, setting: CandleSetting, i: usize) -> f64 {
        let base = if setting.period > 0 {
            let total: f64 = (i - setting.period..i)
                .map(|j| self.measure(setting.kind, j))
                .sum();
            total / setting.period as f64
        } else {
            self.measure(setting.kind, i)
        };
        let divisor = if setting.kind == RangeKind::Shadows {
            2.0
        } else {
            1.0
        };
        setting.factor * base / divisor
    }

    fn body_gap_down(&self, i: usize) -> bool {
        self.open[i].max(self.close[i]) < self.open[i - 1].min(self.close[i - 1])
    }

    /// Score every candle from `lookback` onwards, zero before.
    fn scan(&self, lookback: usize, score: impl Fn(&Self, usize) -> i32) -> Vec<i32> {
        (0..self.len())
            .map(|i| if i < lookback { 0 } else { score(self, i) })
            .collect()
    }
}

/// Doji: open and close are virtually equal.
#[derive(Debug, Clone)]
pub struct Doji {
    pub body_doji: CandleSetting,
}

impl Default for Doji {
    fn default() -> Self {
        Self {
            body_doji: CandleSetting::BODY_DOJI,
        }
    }
}

impl CandlePattern for Doji {
    fn recognize(
        &self,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<i32>, IndicatorError> {
        let c = Ohlc::new(open, high, low, close)?;
        Ok(c.scan(self.lookback(), |c, i| {
            if c.real_body(i) <= c.average(self.body_doji, i) {
                100
            } else {
                0
            }
        }))
    }

    fn lookback(&self) -> usize {
        self.body_doji.period
    }

    fn name(&self) -> &str {
        "CDLDOJI"
    }
}

/// Inverted hammer: small body, long upper shadow, almost no lower shadow,
/// gapping down from the previous body.
#[derive(Debug, Clone)]
pub struct InvertedHammer {
    pub body_short: CandleSetting,
    pub shadow_long: CandleSetting,
    pub shadow_very_short: CandleSetting,
}

impl Default for InvertedHammer {
    fn default() -> Self {
        Self {
            body_short: CandleSetting::BODY_SHORT,
            shadow_long: CandleSetting::SHADOW_LONG,
            shadow_very_short: CandleSetting::SHADOW_VERY_SHORT,
        }
    }
}

impl CandlePattern for InvertedHammer {
    fn recognize(
        &self,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<i32>, IndicatorError> {
        let c = Ohlc::new(open, high, low, close)?;
        Ok(c.scan(self.lookback(), |c, i| {
            let matched = c.real_body(i) < c.average(self.body_short, i)
                && c.upper_shadow(i) > c.average(self.shadow_long, i)
                && c.lower_shadow(i) < c.average(self.shadow_very_short, i)
                && c.body_gap_down(i);
            if matched {
                100
            } else {
                0
            }
        }))
    }

    fn lookback(&self) -> usize {
        self.body_short
            .period
            .max(self.shadow_long.period)
            .max(self.shadow_very_short.period)
            + 1
    }

    fn name(&self) -> &str {
        "CDLINVERTEDHAMMER"
    }
}

/// Hammer: small body, long lower shadow, almost no upper shadow, body at
/// or near the previous candle's low.
#[derive(Debug, Clone)]
pub struct Hammer {
    pub body_short: CandleSetting,
    pub shadow_long: CandleSetting,
    pub shadow_very_short: CandleSetting,
    pub near: CandleSetting,
}

impl Default for Hammer {
    fn default() -> Self {
        Self {
            body_short: CandleSetting::BODY_SHORT,
            shadow_long: CandleSetting::SHADOW_LONG,
            shadow_very_short: CandleSetting::SHADOW_VERY_SHORT,
            near: CandleSetting::NEAR,
        }
    }
}

impl CandlePattern for Hammer {
    fn recognize(
        &self,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<i32>, IndicatorError> {
        let c = Ohlc::new(open, high, low, close)?;
        Ok(c.scan(self.lookback(), |c, i| {
            let matched = c.real_body(i) < c.average(self.body_short, i)
                && c.lower_shadow(i) > c.average(self.shadow_long, i)
                && c.upper_shadow(i) < c.average(self.shadow_very_short, i)
                && c.close[i].min(c.open[i]) <= c.low[i - 1] + c.average(self.near, i - 1);
            if matched {
                100
            } else {
                0
            }
        }))
    }

    fn lookback(&self) -> usize {
        self.body_short
            .period
            .max(self.shadow_long.period)
            .max(self.shadow_very_short.period)
            .max(self.near.period)
            + 1
    }

    fn name(&self) -> &str {
        "CDLHAMMER"
    }
}

/// Engulfing: the body fully covers the opposite-colored previous body.
///
/// Scores `±100`, or `±80` when the open equals the previous close.
#[derive(Debug, Clone, Default)]
pub struct Engulfing;

impl CandlePattern for Engulfing {
    fn recognize(
        &self,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<i32>, IndicatorError> {
        let c = Ohlc::new(open, high, low, close)?;
        Ok(c.scan(self.lookback(), |c, i| {
            let (o, cl) = (c.open[i], c.close[i]);
            let (po, pc) = (c.open[i - 1], c.close[i - 1]);

            let bullish = c.color(i) == 1
                && c.color(i - 1) == -1
                && ((cl >= po && o < pc) || (cl > po && o <= pc));
            let bearish = c.color(i) == -1
                && c.color(i - 1) == 1
                && ((o >= pc && cl < po) || (o > pc && cl <= po));

            if !(bullish || bearish) {
                0
            } else if o != pc {
                c.color(i) * 100
            } else {
                c.color(i) * 80
            }
        }))
    }

    fn lookback(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "CDLENGULFING"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Columns built from (open, high, low, close) tuples.
    fn columns(candles: &[(f64, f64, f64, f64)]) -> [Vec<f64>; 4] {
        [
            candles.iter().map(|c| c.0).collect(),
            candles.iter().map(|c| c.1).collect(),
            candles.iter().map(|c| c.2).collect(),
            candles.iter().map(|c| c.3).collect(),
        ]
    }

    fn recognize(pattern: &dyn CandlePattern, candles: &[(f64, f64, f64, f64)]) -> Vec<i32> {
        let [o, h, l, c] = columns(candles);
        pattern.recognize(&o, &h, &l, &c).unwrap()
    }

    /// Eleven ordinary white candles: range 10, body 2.
    fn base() -> Vec<(f64, f64, f64, f64)> {
        vec![(100.0, 105.0, 95.0, 102.0); 11]
    }

    #[test]
    fn test_doji() {
        let mut candles = base();
        candles.push((100.0, 104.0, 96.0, 100.5)); // body 0.5 <= 1.0
        candles.push((100.0, 104.0, 96.0, 101.5)); // body 1.5 > 1.0

        let result = recognize(&Doji::default(), &candles);
        assert_eq!(result.len(), 13);
        assert_eq!(result[11], 100);
        assert_eq!(result[12], 0);
        assert!(result[..11].iter().all(|v| *v == 0));
    }

    #[test]
    fn test_doji_warmup_never_matches() {
        let candles = vec![(100.0, 101.0, 99.0, 100.0); 10];
        let result = recognize(&Doji::default(), &candles);
        assert_eq!(result, vec![0; 10]);
    }

    #[test]
    fn test_inverted_hammer() {
        let mut candles = base();
        // body 0.5, upper shadow 2.5, lower shadow 0.2, gaps below 100
        candles.push((98.0, 101.0, 97.8, 98.5));

        let result = recognize(&InvertedHammer::default(), &candles);
        assert_eq!(result[11], 100);
        assert_eq!(InvertedHammer::default().lookback(), 11);
    }

    #[test]
    fn test_inverted_hammer_requires_gap_down() {
        let mut candles = base();
        // Same shape but the body overlaps the previous body
        candles.push((100.5, 103.5, 100.3, 101.0));

        let result = recognize(&InvertedHammer::default(), &candles);
        assert_eq!(result[11], 0);
    }

    #[test]
    fn test_inverted_hammer_rejects_long_lower_shadow() {
        let mut candles = base();
        candles.push((98.0, 101.0, 96.0, 98.5));

        let result = recognize(&InvertedHammer::default(), &candles);
        assert_eq!(result[11], 0);
    }

    #[test]
    fn test_hammer() {
        let mut candles = base();
        // body 0.5, lower shadow 2.5, upper shadow 0.2, body low 96 <= 95 + 2
        candles.push((96.0, 96.7, 93.5, 96.5));

        let result = recognize(&Hammer::default(), &candles);
        assert_eq!(result[11], 100);
    }

    #[test]
    fn test_hammer_must_be_near_previous_low() {
        let mut candles = base();
        candles.push((99.5, 100.2, 97.0, 100.0));

        let result = recognize(&Hammer::default(), &candles);
        assert_eq!(result[11], 0);
    }

    #[test]
    fn test_bullish_engulfing() {
        let candles = vec![
            (100.0, 101.0, 99.0, 100.5),
            (102.0, 102.5, 99.5, 100.0), // black
            (99.5, 103.0, 99.0, 102.5),  // white, engulfs
            (102.0, 102.5, 99.5, 100.0), // black
            (100.0, 103.0, 99.5, 102.5), // white, opens at previous close
        ];

        let result = recognize(&Engulfing, &candles);
        assert_eq!(result, vec![0, 0, 100, 0, 80]);
    }

    #[test]
    fn test_bearish_engulfing() {
        let candles = vec![
            (100.0, 101.0, 99.0, 100.5),
            (100.0, 102.5, 99.5, 102.0), // white
            (102.5, 103.0, 99.0, 99.5),  // black, engulfs
        ];

        let result = recognize(&Engulfing, &candles);
        assert_eq!(result, vec![0, 0, -100]);
    }

    #[test]
    fn test_mismatched_inputs() {
        let result = Doji::default().recognize(&[1.0, 2.0], &[1.0], &[1.0, 2.0], &[1.0, 2.0]);
        assert!(matches!(result, Err(IndicatorError::MismatchedInputs)));
    }

    #[test]
    fn test_shadows_average_halves() {
        let o = [100.0, 100.0];
        let h = [104.0, 104.0];
        let l = [96.0, 96.0];
        let c = [102.0, 102.0];
        let ohlc = Ohlc::new(&o, &h, &l, &c).unwrap();

        // shadows 2 + 4 = 6, halved
        let setting = CandleSetting::new(RangeKind::Shadows, 1, 1.0);
        assert!((ohlc.average(setting, 1) - 3.0).abs() < 1e-10);
    }
}
