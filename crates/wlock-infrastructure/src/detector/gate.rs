//! Write gate
//!
//! Re-asserts the advisory lock right before write traffic. On a healthy
//! session this is a reentrant no-wait call. If the session was lost and
//! nobody else grabbed the lock, a fresh session transparently takes it back.
//! If another instance holds it, this process is no longer the writer: the
//! shutdown signal fires and the write is refused.

use crate::shutdown::ShutdownSignal;
use std::time::Duration;
use tracing::error;
use wlock_domain::error::{Error, Result};
use wlock_domain::ports::SharedLockingStrategy;

/// Gate every write path goes through
#[derive(Debug, Clone)]
pub struct ExclusiveAccess {
    strategy: SharedLockingStrategy,
    signal: ShutdownSignal,
    timeout: Duration,
}

impl ExclusiveAccess {
    /// Create a gate re-asserting `strategy` within `timeout`
    pub fn new(strategy: SharedLockingStrategy, signal: ShutdownSignal, timeout: Duration) -> Self {
        Self {
            strategy,
            signal,
            timeout,
        }
    }

    /// Strategy guarded by this gate
    pub fn strategy(&self) -> &SharedLockingStrategy {
        &self.strategy
    }

    /// Signal fired when exclusivity is lost
    pub fn signal(&self) -> &ShutdownSignal {
        &self.signal
    }

    /// Confirm this process still holds exclusive access. Blocking.
    pub fn ensure(&self) -> Result<()> {
        if let Some(reason) = self.signal.reason() {
            return Err(Error::shutting_down(reason));
        }
        match self.strategy.lock(self.timeout) {
            Ok(()) => Ok(()),
            Err(err) if err.is_no_advisory_lock() => {
                error!(error = %err, "Exclusive database access lost to another instance");
                self.signal.fire(err.to_string());
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Run a write once exclusive access is confirmed
    pub fn run<T, F>(&self, write: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.ensure()?;
        write()
    }
}
