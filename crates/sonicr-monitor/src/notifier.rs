//! Signal notification sinks.

use sonicr_core::traits::Notifier;
use sonicr_core::types::Signal;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Writes every signal to the log at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, signal: &Signal) {
        info!(
            target: "sonicr::notify",
            pair = %signal.pair,
            signal = %signal.signal_type,
            price = signal.price,
            timestamp = signal.timestamp,
            "{}",
            signal.message()
        );
    }
}

/// Keeps every signal in memory, for reports and tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    signals: Mutex<Vec<Signal>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals received so far, oldest first.
    pub fn signals(&self) -> Vec<Signal> {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signal messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.signals().iter().map(Signal::message).collect()
    }

    pub fn len(&self) -> usize {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, signal: &Signal) {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(signal.clone());
    }
}

/// Forwards every signal to each inner sink in order.
#[derive(Default)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, signal: &Signal) {
        for sink in &self.sinks {
            sink.notify(signal);
        }
    }
}
