//! No-op locking strategy
//!
//! Used when every logical caller already runs inside its own isolated
//! transaction, so cross-process exclusivity is meaningless. Performs no I/O.

use std::time::Duration;
use tracing::trace;
use wlock_domain::error::Result;
use wlock_domain::ports::LockingStrategy;
use wlock_domain::value_objects::{LockStatus, StrategyKind};

/// Locking strategy that always succeeds without touching the network
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLockingStrategy;

impl NoOpLockingStrategy {
    /// Create a new no-op strategy
    pub fn new() -> Self {
        Self
    }
}

impl LockingStrategy for NoOpLockingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NoOp
    }

    fn lock(&self, _timeout: Duration) -> Result<()> {
        trace!("No-op lock");
        Ok(())
    }

    fn unlock(&self, _timeout: Duration) -> Result<()> {
        trace!("No-op unlock");
        Ok(())
    }

    fn status(&self) -> LockStatus {
        LockStatus::Unheld
    }

    fn probe(&self, _timeout: Duration) -> Result<LockStatus> {
        Ok(LockStatus::Unheld)
    }
}
