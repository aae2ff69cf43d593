//! Notification sink provided by the host.

use crate::types::Signal;

/// Outbound channel a strategy uses to announce a fresh signal.
///
/// Implementations must not block for long: they are called from inside
/// the strategy callbacks.
pub trait Notifier: Send + Sync {
    fn notify(&self, signal: &Signal);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _signal: &Signal) {}
}
