//! Value Objects
//!
//! Immutable values threaded through strategy construction and reported
//! in diagnostics.

pub mod dialect;
pub mod lock_id;
pub mod status;
pub mod target;

pub use dialect::Dialect;
pub use lock_id::AdvisoryLockId;
pub use status::{LockStatus, StrategyKind};
pub use target::ConnectionTarget;
