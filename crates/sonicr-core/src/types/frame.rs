//! Labeled per-pair candle table.
//!
//! A [`CandleFrame`] holds one row per candle in chronological order. The raw
//! price columns (`open`, `high`, `low`, `close`, `volume`) are fixed at
//! construction; strategies append indicator, pattern, label and flag columns.
//! Columns are never removed and rows are never reordered.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Candle;
use crate::error::FrameError;

/// Raw price columns, in storage order.
pub const RAW_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

const OPEN: usize = 0;
const HIGH: usize = 1;
const LOW: usize = 2;
const CLOSE: usize = 3;
const VOLUME: usize = 4;

/// Trend label written by entry/exit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
        }
    }
}

/// Kind of values stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    Pattern,
    Label,
    Flag,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Float => "float",
            ColumnKind::Pattern => "pattern",
            ColumnKind::Label => "label",
            ColumnKind::Flag => "flag",
        }
    }
}

/// A single frame column. Every column has exactly one value per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric values; `NaN` marks rows where the value is not available.
    Float(Vec<f64>),
    /// Candlestick pattern output (`100` bullish, `-100` bearish, `0` none).
    Pattern(Vec<i32>),
    /// Trend labels; `None` means the label was never set on that row.
    Label(Vec<Option<Trend>>),
    /// Boolean signal flags.
    Flag(Vec<bool>),
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Float(_) => ColumnKind::Float,
            Column::Pattern(_) => ColumnKind::Pattern,
            Column::Label(_) => ColumnKind::Label,
            Column::Flag(_) => ColumnKind::Flag,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Pattern(v) => v.len(),
            Column::Label(v) => v.len(),
            Column::Flag(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Time-ordered table of candles plus derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleFrame {
    timestamps: Vec<i64>,
    columns: Vec<(String, Column)>,
}

impl CandleFrame {
    /// Build a frame from candles.
    ///
    /// Candles must be non-empty with strictly increasing timestamps.
    pub fn from_candles(candles: &[Candle]) -> Result<Self, FrameError> {
        if candles.is_empty() {
            return Err(FrameError::Empty);
        }

        for (row, pair) in candles.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(FrameError::Unordered {
                    row: row + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }

        let extract = |f: fn(&Candle) -> f64| Column::Float(candles.iter().map(f).collect());
        let columns = vec![
            ("open".to_string(), extract(|c| c.open)),
            ("high".to_string(), extract(|c| c.high)),
            ("low".to_string(), extract(|c| c.low)),
            ("close".to_string(), extract(|c| c.close)),
            ("volume".to_string(), extract(|c| c.volume)),
        ];

        Ok(Self {
            timestamps: candles.iter().map(|c| c.timestamp).collect(),
            columns,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Candle timestamps (Unix milliseconds), oldest first.
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn open(&self) -> &[f64] {
        self.raw(OPEN)
    }

    pub fn high(&self) -> &[f64] {
        self.raw(HIGH)
    }

    pub fn low(&self) -> &[f64] {
        self.raw(LOW)
    }

    pub fn close(&self) -> &[f64] {
        self.raw(CLOSE)
    }

    pub fn volume(&self) -> &[f64] {
        self.raw(VOLUME)
    }

    fn raw(&self, index: usize) -> &[f64] {
        match &self.columns[index].1 {
            Column::Float(values) => values,
            _ => &[],
        }
    }

    /// Index of the most recent row.
    pub fn last_row(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Column names in insertion order, raw price columns first.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i].1)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    /// Numeric column values.
    pub fn floats(&self, name: &str) -> Result<&[f64], FrameError> {
        match self.require(name)? {
            Column::Float(values) => Ok(values),
            other => Err(mismatch(name, ColumnKind::Float, other)),
        }
    }

    /// Pattern column values.
    pub fn patterns(&self, name: &str) -> Result<&[i32], FrameError> {
        match self.require(name)? {
            Column::Pattern(values) => Ok(values),
            other => Err(mismatch(name, ColumnKind::Pattern, other)),
        }
    }

    /// Label column values.
    pub fn labels(&self, name: &str) -> Result<&[Option<Trend>], FrameError> {
        match self.require(name)? {
            Column::Label(values) => Ok(values),
            other => Err(mismatch(name, ColumnKind::Label, other)),
        }
    }

    /// Flag column values.
    pub fn flags(&self, name: &str) -> Result<&[bool], FrameError> {
        match self.require(name)? {
            Column::Flag(values) => Ok(values),
            other => Err(mismatch(name, ColumnKind::Flag, other)),
        }
    }

    /// Flag value on `row`; a missing column reads as unset.
    pub fn flag_at(&self, name: &str, row: usize) -> bool {
        self.flags(name)
            .ok()
            .and_then(|values| values.get(row).copied())
            .unwrap_or(false)
    }

    /// Row mask where the label column equals `trend`.
    pub fn label_mask(&self, name: &str, trend: Trend) -> Result<Vec<bool>, FrameError> {
        Ok(self
            .labels(name)?
            .iter()
            .map(|label| *label == Some(trend))
            .collect())
    }

    fn require(&self, name: &str) -> Result<&Column, FrameError> {
        self.column(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }

    /// Add a numeric column, replacing an existing numeric column of the same name.
    pub fn insert_float(&mut self, name: &str, values: Vec<f64>) -> Result<(), FrameError> {
        self.insert(name, Column::Float(values))
    }

    /// Add a pattern column, replacing an existing pattern column of the same name.
    pub fn insert_pattern(&mut self, name: &str, values: Vec<i32>) -> Result<(), FrameError> {
        self.insert(name, Column::Pattern(values))
    }

    fn insert(&mut self, name: &str, column: Column) -> Result<(), FrameError> {
        if RAW_COLUMNS.contains(&name) {
            return Err(FrameError::KindMismatch {
                column: name.to_string(),
                expected: "derived",
                actual: "raw",
            });
        }
        self.check_len(name, column.len())?;

        match self.position(name) {
            Some(i) => {
                let existing = self.columns[i].1.kind();
                if existing != column.kind() {
                    return Err(mismatch(name, existing, &column));
                }
                self.columns[i].1 = column;
            }
            None => self.columns.push((name.to_string(), column)),
        }
        Ok(())
    }

    /// Write `trend` into the label column on every row where `mask` is true.
    ///
    /// Rows where the mask is false keep their current label. The column is
    /// created unset on first write.
    pub fn set_label_where(
        &mut self,
        name: &str,
        mask: &[bool],
        trend: Trend,
    ) -> Result<(), FrameError> {
        self.check_len(name, mask.len())?;
        let rows = self.len();
        match self.column_or_insert(name, || Column::Label(vec![None; rows]))? {
            Column::Label(values) => {
                for (value, hit) in values.iter_mut().zip(mask) {
                    if *hit {
                        *value = Some(trend);
                    }
                }
                Ok(())
            }
            other => Err(mismatch(name, ColumnKind::Label, other)),
        }
    }

    /// Raise the flag column on every row where `mask` is true.
    ///
    /// Rows where the mask is false keep their current value. The column is
    /// created all-false on first write.
    pub fn set_flag_where(&mut self, name: &str, mask: &[bool]) -> Result<(), FrameError> {
        self.check_len(name, mask.len())?;
        let rows = self.len();
        match self.column_or_insert(name, || Column::Flag(vec![false; rows]))? {
            Column::Flag(values) => {
                for (value, hit) in values.iter_mut().zip(mask) {
                    *value |= *hit;
                }
                Ok(())
            }
            other => Err(mismatch(name, ColumnKind::Flag, other)),
        }
    }

    fn column_or_insert(
        &mut self,
        name: &str,
        init: impl FnOnce() -> Column,
    ) -> Result<&mut Column, FrameError> {
        if RAW_COLUMNS.contains(&name) {
            return Err(FrameError::KindMismatch {
                column: name.to_string(),
                expected: "derived",
                actual: "raw",
            });
        }
        let index = match self.position(name) {
            Some(i) => i,
            None => {
                self.columns.push((name.to_string(), init()));
                self.columns.len() - 1
            }
        };
        Ok(&mut self.columns[index].1)
    }

    fn check_len(&self, name: &str, actual: usize) -> Result<(), FrameError> {
        if actual != self.len() {
            return Err(FrameError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }
}

fn mismatch(name: &str, expected: ColumnKind, found: &Column) -> FrameError {
    FrameError::KindMismatch {
        column: name.to_string(),
        expected: expected.name(),
        actual: found.kind().name(),
    }
}
