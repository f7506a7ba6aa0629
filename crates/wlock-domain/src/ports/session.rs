//! Lock Session Port
//!
//! The driver seam for session-scoped advisory locks. A session is one
//! physical database connection; it is never drawn from or returned to a pool.

use crate::error::Result;
use crate::value_objects::{AdvisoryLockId, ConnectionTarget};
use std::sync::Arc;
use std::time::Duration;

/// Opens dedicated lock sessions against one target
pub trait SessionConnector: Send + Sync {
    /// Target the sessions connect to
    fn target(&self) -> &ConnectionTarget;

    /// Open a new dedicated session, bounded by `timeout` (zero means unbounded)
    fn connect(&self, timeout: Duration) -> Result<Box<dyn LockSession>>;
}

/// Shared connector handle
pub type SharedSessionConnector = Arc<dyn SessionConnector>;

/// One dedicated database session holding advisory locks
///
/// Methods report `Error::ConnectionClosed` when the driver finds the session
/// already gone.
pub trait LockSession: Send {
    /// Blocking session-level acquisition of `lock_id`.
    ///
    /// Bounded by `timeout`; zero waits indefinitely.
    fn acquire(&mut self, lock_id: AdvisoryLockId, timeout: Duration) -> Result<()>;

    /// Release every advisory lock held by this session
    fn release_all(&mut self, timeout: Duration) -> Result<()>;

    /// Whether the driver already knows the session is closed (no I/O)
    fn is_closed(&self) -> bool;

    /// Round-trip liveness check bounded by `timeout`
    fn is_alive(&mut self, timeout: Duration) -> bool;

    /// Close the connection handle
    fn close(self: Box<Self>) -> Result<()>;
}
