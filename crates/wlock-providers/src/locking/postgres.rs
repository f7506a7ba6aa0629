//! PostgreSQL lock sessions
//!
//! Opens one physical connection per lock session with the synchronous
//! `postgres` client (re-exported by `r2d2_postgres`). The connection is
//! deliberately not pooled: advisory locks belong to the backend session
//! that took them, and a pool would hand the lock to whoever borrows the
//! connection next or silently drop it on recycle.
//!
//! Timeouts are enforced server-side where possible:
//!
//! - `connect_timeout` bounds dialing
//! - `lock_timeout` bounds `pg_advisory_lock` waits (lock waits report
//!   `55P03 lock_not_available` when it expires)
//! - `statement_timeout` bounds the release round-trip
//!
//! A zero timeout leaves the corresponding bound disabled. Any other timeout
//! is rounded up to whole milliseconds, so a sub-millisecond bound never
//! turns into "wait forever".

use crate::constants::{
    LOCK_SESSION_APPLICATION_NAME, LOCK_SESSION_KEEPALIVE_IDLE, MAX_SESSION_TIMEOUT_MILLIS,
};
use r2d2_postgres::postgres::{Client, Config, NoTls};
use std::time::Duration;
use tracing::debug;
use wlock_domain::error::{Error, Result};
use wlock_domain::error_ext::ErrorContext;
use wlock_domain::ports::{LockSession, SessionConnector};
use wlock_domain::value_objects::{AdvisoryLockId, ConnectionTarget};

/// Dials dedicated PostgreSQL sessions for advisory locking
#[derive(Debug, Clone)]
pub struct PostgresSessionConnector {
    target: ConnectionTarget,
}

impl PostgresSessionConnector {
    /// Create a connector for a URL or key/value DSN.
    ///
    /// The target is parsed when a session is opened, so a malformed target
    /// surfaces as a connection error from `lock`.
    pub fn new<T: Into<ConnectionTarget>>(target: T) -> Self {
        Self {
            target: target.into(),
        }
    }

    fn session_config(&self, timeout: Duration) -> Result<Config> {
        let mut config = self
            .target
            .as_str()
            .parse::<Config>()
            .connection_context(format!("invalid lock session target {}", self.target))?;
        config
            .application_name(LOCK_SESSION_APPLICATION_NAME)
            .keepalives(true)
            .keepalives_idle(LOCK_SESSION_KEEPALIVE_IDLE);
        if !timeout.is_zero() {
            config.connect_timeout(timeout);
        }
        Ok(config)
    }
}

impl SessionConnector for PostgresSessionConnector {
    fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    fn connect(&self, timeout: Duration) -> Result<Box<dyn LockSession>> {
        let config = self.session_config(timeout)?;
        let client = config
            .connect(NoTls)
            .connection_context(format!("failed to open lock session to {}", self.target))?;
        debug!(target = %self.target, "Opened dedicated lock session");
        Ok(Box::new(PostgresLockSession { client }))
    }
}

/// Millisecond value for `lock_timeout` / `statement_timeout`.
///
/// Zero stays zero (disabled); anything else rounds up to at least one
/// millisecond and is clamped to the server's maximum.
fn timeout_setting_millis(timeout: Duration) -> u128 {
    if timeout.is_zero() {
        return 0;
    }
    timeout
        .as_nanos()
        .div_ceil(1_000_000)
        .clamp(1, MAX_SESSION_TIMEOUT_MILLIS)
}

/// Bounded session-level acquisition as one simple-query batch
fn lock_statement(lock_id: AdvisoryLockId, timeout: Duration) -> String {
    format!(
        "SET lock_timeout = {}; SELECT pg_advisory_lock('{}'::bigint)",
        timeout_setting_millis(timeout),
        lock_id.get()
    )
}

/// Bounded release of every session-level advisory lock
fn unlock_all_statement(timeout: Duration) -> String {
    format!(
        "SET statement_timeout = {}; SELECT pg_advisory_unlock_all()",
        timeout_setting_millis(timeout)
    )
}

/// One dedicated PostgreSQL session
pub struct PostgresLockSession {
    client: Client,
}

impl PostgresLockSession {
    /// Map a driver error, recognising a session that is already gone
    fn classify(&self, err: r2d2_postgres::postgres::Error, action: &str) -> Error {
        if err.is_closed() || self.client.is_closed() {
            Error::connection_closed(format!("{action}: {err}"))
        } else {
            Error::database_with_source(action.to_string(), err)
        }
    }
}

impl LockSession for PostgresLockSession {
    fn acquire(&mut self, lock_id: AdvisoryLockId, timeout: Duration) -> Result<()> {
        self.client
            .batch_execute(&lock_statement(lock_id, timeout))
            .map_err(|e| self.classify(e, "pg_advisory_lock"))
    }

    fn release_all(&mut self, timeout: Duration) -> Result<()> {
        self.client
            .batch_execute(&unlock_all_statement(timeout))
            .map_err(|e| self.classify(e, "pg_advisory_unlock_all"))
    }

    fn is_closed(&self) -> bool {
        self.client.is_closed()
    }

    fn is_alive(&mut self, timeout: Duration) -> bool {
        self.client.is_valid(timeout).is_ok()
    }

    fn close(self: Box<Self>) -> Result<()> {
        if self.client.is_closed() {
            return Err(Error::connection_closed("closing lock session"));
        }
        self.client.close().or_else(|e| {
            if e.is_closed() {
                Err(Error::connection_closed(format!("closing lock session: {e}")))
            } else {
                Err(e).connection_context("failed to close lock session")
            }
        })
    }
}

impl std::fmt::Debug for PostgresLockSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresLockSession")
            .field("closed", &self.client.is_closed())
            .finish()
    }
}
