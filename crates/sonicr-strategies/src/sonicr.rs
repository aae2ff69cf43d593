//! SonicR Strategy.
//!
//! Context: EMA34 at or above EMA89, RSI14 between 50 and 60.
//! Signal: a bullish candlestick pattern on a white candle closing above
//! EMA34. Exits when RSI crosses above 80 while the EMA trend is down.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use sonicr_core::{
    error::StrategyError,
    traits::{CandlePattern, Indicator, Notifier, Strategy, StrategyConfig},
    types::{CandleFrame, PairMetadata, Signal, SignalType, Timeframe, Trend},
};
use sonicr_indicators::{crossed_above_value, Doji, Ema, Engulfing, Hammer, InvertedHammer, Rsi};

/// Names of the label and signal columns written by the strategy.
pub mod columns {
    pub const RSI: &str = "rsi";
    pub const EMA_TREND: &str = "ema_trend";
    pub const RSI_TREND: &str = "rsi_trend";
    pub const PRICE_HIGH_TREND: &str = "price_high_trend";
    pub const PRICE_TREND: &str = "price_trend";
    pub const CANDLE_TREND: &str = "candle_trend";
    pub const ENTER_LONG: &str = "enter_long";
    pub const EXIT_LONG: &str = "exit_long";
}

/// Candlestick patterns that can confirm an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BullishPattern {
    Doji,
    InvertedHammer,
    Hammer,
    Engulfing,
}

impl BullishPattern {
    fn recognizer(&self) -> Box<dyn CandlePattern> {
        match self {
            BullishPattern::Doji => Box::new(Doji::default()),
            BullishPattern::InvertedHammer => Box::new(InvertedHammer::default()),
            BullishPattern::Hammer => Box::new(Hammer::default()),
            BullishPattern::Engulfing => Box::new(Engulfing),
        }
    }
}

/// Configuration for the SonicR strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SonicRConfig {
    /// Pairs to analyze
    pub pairs: Vec<String>,
    /// Candle timeframe
    pub timeframe: Timeframe,
    /// Candles required before signals are meaningful
    pub startup_candle_count: usize,
    /// Hard stoploss ratio handed to the host
    pub stoploss: Decimal,
    /// Fast EMA period (context and price filter)
    pub ema_fast_period: usize,
    /// Slow EMA period (context)
    pub ema_slow_period: usize,
    /// RSI calculation period
    pub rsi_period: usize,
    /// RSI must be strictly above this for an up trend
    pub rsi_lower: f64,
    /// RSI must be strictly below this for an up trend
    pub rsi_upper: f64,
    /// Exit when RSI crosses above this level
    pub rsi_exit_level: f64,
    /// Include the RSI trend label in the entry conjunction
    pub require_rsi_trend: bool,
    /// Patterns accepted as bullish confirmation
    pub bullish_patterns: Vec<BullishPattern>,
    /// Notify the host when the latest candle carries an entry
    pub notify_on_entry: bool,
}

impl Default for SonicRConfig {
    fn default() -> Self {
        Self {
            pairs: vec![],
            timeframe: Timeframe::Hour4,
            startup_candle_count: 200,
            stoploss: dec!(-0.05),
            ema_fast_period: 34,
            ema_slow_period: 89,
            rsi_period: 14,
            rsi_lower: 50.0,
            rsi_upper: 60.0,
            rsi_exit_level: 80.0,
            require_rsi_trend: true,
            bullish_patterns: vec![BullishPattern::Doji, BullishPattern::InvertedHammer],
            notify_on_entry: true,
        }
    }
}

impl StrategyConfig for SonicRConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.pairs.is_empty() {
            return Err(StrategyError::InvalidConfig(
                "At least one pair required".into(),
            ));
        }
        if self.ema_fast_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Fast EMA period must be greater than 0".into(),
            ));
        }
        if self.ema_fast_period >= self.ema_slow_period {
            return Err(StrategyError::InvalidConfig(
                "Fast EMA period must be less than slow EMA period".into(),
            ));
        }
        if self.rsi_period < 2 {
            return Err(StrategyError::InvalidConfig(
                "RSI period must be at least 2".into(),
            ));
        }
        if self.rsi_lower < 0.0 || self.rsi_upper > 100.0 || self.rsi_lower >= self.rsi_upper {
            return Err(StrategyError::InvalidConfig(
                "RSI band must satisfy 0 <= lower < upper <= 100".into(),
            ));
        }
        if self.rsi_exit_level <= 0.0 || self.rsi_exit_level >= 100.0 {
            return Err(StrategyError::InvalidConfig(
                "RSI exit level must be between 0 and 100".into(),
            ));
        }
        if self.stoploss <= dec!(-1) || self.stoploss >= Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "Stoploss must be a negative ratio above -1".into(),
            ));
        }
        if self.bullish_patterns.is_empty() {
            return Err(StrategyError::InvalidConfig(
                "At least one bullish pattern required".into(),
            ));
        }
        if self.startup_candle_count < self.ema_slow_period {
            return Err(StrategyError::InvalidConfig(format!(
                "Startup candle count ({}) must cover the slow EMA period ({})",
                self.startup_candle_count, self.ema_slow_period
            )));
        }
        Ok(())
    }
}

/// SonicR Strategy.
pub struct SonicRStrategy {
    config: SonicRConfig,
    ema_fast: Ema,
    ema_slow: Ema,
    rsi: Rsi,
    patterns: Vec<Box<dyn CandlePattern>>,
    notifier: Arc<dyn Notifier>,
}

impl SonicRStrategy {
    /// Create a new SonicR strategy that reports entries to `notifier`.
    pub fn new(config: SonicRConfig, notifier: Arc<dyn Notifier>) -> Self {
        let patterns = config
            .bullish_patterns
            .iter()
            .map(BullishPattern::recognizer)
            .collect();
        Self {
            ema_fast: Ema::new(config.ema_fast_period),
            ema_slow: Ema::new(config.ema_slow_period),
            rsi: Rsi::new(config.rsi_period),
            patterns,
            config,
            notifier,
        }
    }

    pub fn config(&self) -> &SonicRConfig {
        &self.config
    }

    /// Column holding the fast EMA, e.g. `ema34`.
    pub fn ema_fast_column(&self) -> &str {
        self.ema_fast.name()
    }

    /// Column holding the slow EMA, e.g. `ema89`.
    pub fn ema_slow_column(&self) -> &str {
        self.ema_slow.name()
    }

    /// Rows where any enabled bullish pattern fired.
    fn bullish_candles(&self, frame: &CandleFrame) -> Result<Vec<bool>, StrategyError> {
        let mut mask = vec![false; frame.len()];
        for pattern in &self.patterns {
            let values = frame.patterns(pattern.name())?;
            for (hit, value) in mask.iter_mut().zip(values) {
                *hit |= *value > 0;
            }
        }
        Ok(mask)
    }

    fn notify_latest_entry(&self, frame: &CandleFrame, metadata: &PairMetadata) {
        let Some(last) = frame.last_row() else {
            return;
        };
        if !frame.flag_at(columns::ENTER_LONG, last) {
            return;
        }

        let signal = Signal::new(
            metadata.pair.clone(),
            SignalType::EnterLong,
            frame.close()[last],
            frame.timestamps()[last],
        );
        info!(pair = %metadata.pair, price = signal.price, "{}", signal.message());
        self.notifier.notify(&signal);
    }
}

/// Element-wise AND of row masks.
fn all_of(masks: &[&[bool]]) -> Vec<bool> {
    let len = masks.first().map_or(0, |m| m.len());
    (0..len).map(|i| masks.iter().all(|m| m[i])).collect()
}

impl Strategy for SonicRStrategy {
    fn name(&self) -> &str {
        "SonicR"
    }

    fn description(&self) -> &str {
        "EMA34/EMA89 trend context with RSI band and bullish candlestick confirmation"
    }

    fn timeframe(&self) -> Timeframe {
        self.config.timeframe
    }

    fn startup_candle_count(&self) -> usize {
        self.config.startup_candle_count
    }

    fn stoploss(&self) -> Decimal {
        self.config.stoploss
    }

    fn pairs(&self) -> &[String] {
        &self.config.pairs
    }

    fn populate_indicators(
        &self,
        mut frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError> {
        debug!(pair = %metadata.pair, rows = frame.len(), "Populating indicators");

        let ema_fast = self.ema_fast.calculate_aligned(frame.close());
        frame.insert_float(self.ema_fast.name(), ema_fast)?;

        let ema_slow = self.ema_slow.calculate_aligned(frame.close());
        frame.insert_float(self.ema_slow.name(), ema_slow)?;

        let rsi = self.rsi.calculate_aligned(frame.close());
        frame.insert_float(columns::RSI, rsi)?;

        for pattern in &self.patterns {
            let values = pattern.recognize(frame.open(), frame.high(), frame.low(), frame.close())?;
            frame.insert_pattern(pattern.name(), values)?;
        }

        Ok(frame)
    }

    fn populate_entry_trend(
        &self,
        mut frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError> {
        let (ema_up, ema_down, rsi_up, rsi_down, price_high_up, price_up, candle_up) = {
            let ema_fast = frame.floats(self.ema_fast.name())?;
            let ema_slow = frame.floats(self.ema_slow.name())?;
            let rsi = frame.floats(columns::RSI)?;
            let open = frame.open();
            let close = frame.close();

            let ema_up: Vec<bool> = ema_fast.iter().zip(ema_slow).map(|(f, s)| f >= s).collect();
            let ema_down: Vec<bool> = ema_fast.iter().zip(ema_slow).map(|(f, s)| f < s).collect();
            let rsi_up: Vec<bool> = rsi
                .iter()
                .map(|r| *r > self.config.rsi_lower && *r < self.config.rsi_upper)
                .collect();
            let rsi_down: Vec<bool> = rsi
                .iter()
                .map(|r| *r <= self.config.rsi_lower || *r >= self.config.rsi_upper)
                .collect();
            let price_high_up: Vec<bool> = close.iter().zip(open).map(|(c, o)| c > o).collect();
            let price_up: Vec<bool> = close.iter().zip(ema_fast).map(|(c, e)| c > e).collect();
            let candle_up = self.bullish_candles(&frame)?;

            (ema_up, ema_down, rsi_up, rsi_down, price_high_up, price_up, candle_up)
        };

        frame.set_label_where(columns::EMA_TREND, &ema_up, Trend::Up)?;
        frame.set_label_where(columns::EMA_TREND, &ema_down, Trend::Down)?;
        frame.set_label_where(columns::RSI_TREND, &rsi_up, Trend::Up)?;
        frame.set_label_where(columns::RSI_TREND, &rsi_down, Trend::Down)?;
        frame.set_label_where(columns::PRICE_HIGH_TREND, &price_high_up, Trend::Up)?;
        frame.set_label_where(columns::PRICE_TREND, &price_up, Trend::Up)?;
        frame.set_label_where(columns::CANDLE_TREND, &candle_up, Trend::Up)?;

        let mut required = vec![
            frame.label_mask(columns::EMA_TREND, Trend::Up)?,
            frame.label_mask(columns::PRICE_TREND, Trend::Up)?,
            frame.label_mask(columns::PRICE_HIGH_TREND, Trend::Up)?,
            frame.label_mask(columns::CANDLE_TREND, Trend::Up)?,
        ];
        if self.config.require_rsi_trend {
            required.push(frame.label_mask(columns::RSI_TREND, Trend::Up)?);
        }
        let slices: Vec<&[bool]> = required.iter().map(Vec::as_slice).collect();
        let enter = all_of(&slices);

        let entries = enter.iter().filter(|e| **e).count();
        frame.set_flag_where(columns::ENTER_LONG, &enter)?;
        debug!(pair = %metadata.pair, entries, "Populated entry trend");

        if self.config.notify_on_entry {
            self.notify_latest_entry(&frame, metadata);
        }

        Ok(frame)
    }

    fn populate_exit_trend(
        &self,
        mut frame: CandleFrame,
        metadata: &PairMetadata,
    ) -> Result<CandleFrame, StrategyError> {
        let rsi_cross = crossed_above_value(frame.floats(columns::RSI)?, self.config.rsi_exit_level);
        let ema_down = frame.label_mask(columns::EMA_TREND, Trend::Down)?;
        let exit = all_of(&[rsi_cross.as_slice(), ema_down.as_slice()]);

        let exits = exit.iter().filter(|e| **e).count();
        frame.set_flag_where(columns::EXIT_LONG, &exit)?;
        debug!(pair = %metadata.pair, exits, "Populated exit trend");

        Ok(frame)
    }
}
