//! Locking strategy providers
//!
//! - [`AdvisoryLockStrategy`] holds a session advisory lock on one dedicated
//!   session opened through a [`SessionConnector`](wlock_domain::SessionConnector)
//! - [`NoOpLockingStrategy`] does nothing, for transaction-wrapped test backends
//! - [`PostgresSessionConnector`] dials real PostgreSQL sessions
//! - [`InMemoryLockServer`] emulates session advisory locks in process

pub mod advisory;
#[cfg(feature = "lock-memory")]
pub mod memory;
pub mod noop;
#[cfg(feature = "lock-postgres")]
pub mod postgres;

pub use advisory::AdvisoryLockStrategy;
#[cfg(feature = "lock-memory")]
pub use memory::{InMemoryLockServer, InMemoryLockSession, InMemorySessionConnector};
pub use noop::NoOpLockingStrategy;
#[cfg(feature = "lock-postgres")]
pub use postgres::{PostgresLockSession, PostgresSessionConnector};
