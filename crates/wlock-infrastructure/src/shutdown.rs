//! Shutdown signal
//!
//! One-shot, process-wide "stop acting as the exclusive writer" notification.
//! Fired when the lock cannot be re-asserted before a write or when the
//! disconnect detector finds the lock session dead. The first reason wins;
//! later calls are no-ops.

use std::sync::{Arc, OnceLock};
use tokio::sync::Notify;
use tracing::error;
use wlock_domain::ports::ShutdownCoordinator;

#[derive(Debug, Default)]
struct SignalInner {
    reason: OnceLock<String>,
    notify: Notify,
}

/// Cloneable handle to a one-shot shutdown signal
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<SignalInner>,
}

impl ShutdownSignal {
    /// Create an unfired signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Returns `true` for the call that actually fired it.
    pub fn fire<S: Into<String>>(&self, reason: S) -> bool {
        let reason = reason.into();
        if self.inner.reason.set(reason).is_err() {
            return false;
        }
        error!(
            reason = self.reason().unwrap_or_default(),
            "Shutdown signaled, exclusive database access is no longer guaranteed"
        );
        self.inner.notify.notify_waiters();
        true
    }

    /// Whether the signal has fired
    pub fn is_fired(&self) -> bool {
        self.inner.reason.get().is_some()
    }

    /// Reason given by the first `fire`
    pub fn reason(&self) -> Option<&str> {
        self.inner.reason.get().map(String::as_str)
    }

    /// Resolve once the signal has fired (immediately if it already has)
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking so a concurrent fire cannot be missed
        notified.as_mut().enable();
        if self.is_fired() {
            return;
        }
        notified.await;
    }
}

impl ShutdownCoordinator for ShutdownSignal {
    fn signal_shutdown(&self, reason: &str) {
        self.fire(reason);
    }

    fn is_shutting_down(&self) -> bool {
        self.is_fired()
    }
}
