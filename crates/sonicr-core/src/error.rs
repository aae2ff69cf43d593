//! Error types for the strategy workspace.

use thiserror::Error;

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Insufficient data: need {required} candles, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Errors raised by [`CandleFrame`](crate::types::CandleFrame) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("Frame has no rows")]
    Empty,

    #[error("Rows out of chronological order at row {row}: {previous} >= {current}")]
    Unordered {
        row: usize,
        previous: i64,
        current: i64,
    },

    #[error("Column '{column}' has {actual} values, frame has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' is {actual}, expected {expected}")]
    KindMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Pair not found: {0}")]
    PairNotFound(String),

    #[error("No data available at {0}")]
    NoDataAvailable(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Input series have different lengths")]
    MismatchedInputs,
}
