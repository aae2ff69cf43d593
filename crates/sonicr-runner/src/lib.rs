//! Signal analysis runner.

mod engine;
mod report;

pub use engine::{RunnerConfig, SignalRunner};
pub use report::{AnalysisReport, PairFailure, PairSummary};
