//! # Domain Layer
//!
//! Types and contracts of the single-writer locking core.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`error_ext`] | Context helpers converting foreign errors |
//! | [`value_objects`] | Lock identifier, dialect, connection target, lock status |
//! | [`ports`] | Locking strategy, lock session and shutdown contracts |
//! | [`constants`] | Production lock identifier and dialect tags |

pub mod constants;
pub mod error;
pub mod error_ext;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use error_ext::ErrorContext;
pub use ports::{LockSession, LockingStrategy, SessionConnector, ShutdownCoordinator};
pub use value_objects::{AdvisoryLockId, ConnectionTarget, Dialect, LockStatus, StrategyKind};
