//! # wlock
//!
//! Single-writer exclusive access to a PostgreSQL database.
//!
//! Several instances of a service may point at the same database (an
//! active/standby pair, or an accidental double start). Only one of them may
//! migrate the schema or write. `wlock` elects that one by holding a
//! session-level advisory lock on a dedicated, unpooled connection, and
//! raises a one-shot shutdown signal when that connection is lost.
//!
//! ## Example
//!
//! ```ignore
//! use wlock::{ConfigLoader, ShutdownSignal, WriterLock};
//!
//! let config = ConfigLoader::new().load()?;
//! let signal = ShutdownSignal::new();
//!
//! // Blocks until the previous writer goes away (lock_timeout = 0)
//! let writer = WriterLock::acquire(&config.database, signal.clone()).await?;
//! writer.access().run(|| migrate(&pool))?;
//!
//! signal.wait().await;
//! writer.release().await?;
//! ```
//!
//! Lower level, the strategy alone:
//!
//! ```ignore
//! use std::time::Duration;
//! use wlock::{LockingStrategy, LockingStrategyFactory};
//!
//! let lock = LockingStrategyFactory::create("postgres", database_url, None)?;
//! lock.lock(Duration::from_secs(10))?;
//! // ... exclusive section ...
//! lock.unlock(Duration::from_secs(5))?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - error taxonomy, value objects and ports
//! - `providers` - advisory-lock and no-op strategies, lock sessions
//! - `infrastructure` - factory, write gate, disconnect detector, config, logging

/// Domain layer - error taxonomy, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wlock_domain::*;
}

/// Provider layer - strategy and lock session implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use wlock_providers::*;
}

/// Infrastructure layer - wiring, detection, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wlock_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export entry points at the crate root
pub use infrastructure::{
    AppConfig, ConfigLoader, DatabaseConfig, DisconnectDetector, ExclusiveAccess,
    LockingStrategyFactory, ShutdownSignal, WriterLock,
};
pub use infrastructure::logging::init_logging;
