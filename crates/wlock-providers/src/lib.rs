//! # Providers
//!
//! Concrete adapters behind the domain locking ports.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`locking`] | Advisory-lock and no-op strategies, PostgreSQL lock sessions |
//! | [`constants`] | Provider defaults |
//!
//! ## Features
//!
//! - `lock-postgres` (default): PostgreSQL session connector using the
//!   synchronous `postgres` client
//! - `lock-memory` (default): in-process lock server for tests and
//!   single-process deployments

pub mod constants;
pub mod locking;
pub mod utils;

#[cfg(feature = "lock-memory")]
pub use locking::{InMemoryLockServer, InMemorySessionConnector};
#[cfg(feature = "lock-postgres")]
pub use locking::{PostgresLockSession, PostgresSessionConnector};
pub use locking::{AdvisoryLockStrategy, NoOpLockingStrategy};
