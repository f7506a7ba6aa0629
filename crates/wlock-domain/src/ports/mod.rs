//! Domain Port Interfaces
//!
//! Boundary contracts between the locking core and its collaborators.
//!
//! - **locking** - the `{lock, unlock}` capability handed to migration and
//!   data-access code
//! - **session** - the database driver seam used by the advisory strategy
//! - **shutdown** - the one-shot "stop writing" notification

/// Locking strategy contract
pub mod locking;
/// Dedicated database session contract
pub mod session;
/// Shutdown coordination contract
pub mod shutdown;

pub use locking::{LockingStrategy, SharedLockingStrategy};
pub use session::{LockSession, SessionConnector, SharedSessionConnector};
pub use shutdown::ShutdownCoordinator;
