//! Database and lock configuration types

use crate::constants::{
    DEFAULT_ENSURE_TIMEOUT, DEFAULT_LOCK_TIMEOUT, DEFAULT_PROBE_INTERVAL, DEFAULT_PROBE_TIMEOUT,
    DEFAULT_RELEASE_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wlock_domain::constants::DIALECT_POSTGRES;
use wlock_domain::value_objects::{AdvisoryLockId, ConnectionTarget};

/// Database connection and exclusive lock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL or key/value DSN
    pub url: ConnectionTarget,

    /// Dialect tag: `postgres` or `txdb`
    pub dialect: String,

    /// Advisory lock identifier; every node of a deployment must agree
    pub advisory_lock_id: AdvisoryLockId,

    /// Startup acquisition timeout (zero waits indefinitely)
    #[serde(with = "crate::config::duration")]
    pub lock_timeout: Duration,

    /// Timeout for re-asserting the lock before writes
    #[serde(with = "crate::config::duration")]
    pub ensure_timeout: Duration,

    /// Timeout for releasing the lock on shutdown
    #[serde(with = "crate::config::duration")]
    pub release_timeout: Duration,

    /// Interval between liveness probes of the lock session
    #[serde(with = "crate::config::duration")]
    pub probe_interval: Duration,

    /// Bound on a single liveness probe
    #[serde(with = "crate::config::duration")]
    pub probe_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: ConnectionTarget::new(""),
            dialect: DIALECT_POSTGRES.to_string(),
            advisory_lock_id: AdvisoryLockId::PRODUCTION,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            ensure_timeout: DEFAULT_ENSURE_TIMEOUT,
            release_timeout: DEFAULT_RELEASE_TIMEOUT,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
