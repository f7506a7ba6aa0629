//! Locking strategy wiring
//!
//! Strategy implementations live in `wlock-providers`; this module only
//! selects and builds one from a dialect tag.

pub mod factory;

pub use factory::LockingStrategyFactory;
