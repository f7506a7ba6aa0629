//! Lock state reported by strategies

use serde::{Deserialize, Serialize};

/// Observable state of a locking strategy instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockStatus {
    /// No token session exists
    #[default]
    Unheld,
    /// A token session exists and the advisory lock is (potentially) held
    Held,
    /// The token session died while held; the strategy is back to unheld
    Lost,
}

/// Concrete strategy variant produced by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Session advisory lock on a dedicated connection
    AdvisoryLock,
    /// No cross-process coordination
    NoOp,
}
