//! Advisory lock identifier

use crate::constants::PRODUCTION_ADVISORY_LOCK_ID;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer key naming the logical resource an advisory lock protects.
///
/// Every contender for the same resource must use the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisoryLockId(i64);

impl AdvisoryLockId {
    /// The fixed production identifier
    pub const PRODUCTION: Self = Self(PRODUCTION_ADVISORY_LOCK_ID);

    /// Wrap a raw identifier
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw value, as bound to `pg_advisory_lock(bigint)`
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Default for AdvisoryLockId {
    fn default() -> Self {
        Self::PRODUCTION
    }
}

impl From<i64> for AdvisoryLockId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AdvisoryLockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
