//! Locking Strategy Port
//!
//! Exclusive-access contract consumed before any schema migration or write
//! traffic. Calls are blocking; async callers should go through
//! `tokio::task::spawn_blocking`.

use crate::error::Result;
use crate::value_objects::{LockStatus, StrategyKind};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Exclusive access to one database, held across processes
///
/// A zero `timeout` waits indefinitely.
pub trait LockingStrategy: Send + Sync + fmt::Debug {
    /// Which variant this is
    fn kind(&self) -> StrategyKind;

    /// Take the lock, blocking up to `timeout`. Reentrant on the same instance.
    fn lock(&self, timeout: Duration) -> Result<()>;

    /// Release the lock. Succeeds when nothing is held.
    fn unlock(&self, timeout: Duration) -> Result<()>;

    /// Current state without any I/O
    fn status(&self) -> LockStatus;

    /// Verify the token session is still alive, bounded by `timeout`.
    ///
    /// Returns `Lost` (and resets to unheld) when a held session turned out
    /// to be dead.
    fn probe(&self, timeout: Duration) -> Result<LockStatus>;
}

/// Shared locking strategy handle
pub type SharedLockingStrategy = Arc<dyn LockingStrategy>;
