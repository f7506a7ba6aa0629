//! Locking Strategy Factory
//!
//! Maps a dialect tag and connection target to the locking strategy that
//! gives exclusive access for that backend.
//!
//! | Dialect | Strategy |
//! |---------|----------|
//! | `postgres` | [`AdvisoryLockStrategy`] on a dedicated session |
//! | `txdb` | [`NoOpLockingStrategy`] |
//!
//! Construction never touches the network; the first session is opened by
//! the first `lock` call.

use std::sync::Arc;

use tracing::debug;
use wlock_domain::error::Result;
use wlock_domain::ports::{SharedLockingStrategy, SharedSessionConnector};
use wlock_domain::value_objects::{AdvisoryLockId, ConnectionTarget, Dialect};
use wlock_providers::locking::{AdvisoryLockStrategy, NoOpLockingStrategy, PostgresSessionConnector};

use crate::config::DatabaseConfig;

/// Factory for creating locking strategies
pub struct LockingStrategyFactory;

impl LockingStrategyFactory {
    /// Create the strategy for `dialect`, connecting to PostgreSQL.
    ///
    /// `lock_id` defaults to the production advisory lock identifier.
    pub fn create(
        dialect: &str,
        target: impl Into<ConnectionTarget>,
        lock_id: Option<AdvisoryLockId>,
    ) -> Result<SharedLockingStrategy> {
        Self::create_with(dialect, target, lock_id, |target| {
            Arc::new(PostgresSessionConnector::new(target.clone()))
        })
    }

    /// Create the strategy for `dialect` with a caller-supplied session connector.
    ///
    /// `connector` is only invoked for dialects that need a lock session.
    pub fn create_with<F>(
        dialect: &str,
        target: impl Into<ConnectionTarget>,
        lock_id: Option<AdvisoryLockId>,
        connector: F,
    ) -> Result<SharedLockingStrategy>
    where
        F: FnOnce(&ConnectionTarget) -> SharedSessionConnector,
    {
        let target = target.into();
        let strategy: SharedLockingStrategy = match Dialect::parse(dialect, &target)? {
            Dialect::Postgres => {
                let lock_id = lock_id.unwrap_or_default();
                debug!(%lock_id, %target, "Creating advisory lock strategy");
                Arc::new(AdvisoryLockStrategy::new(connector(&target), lock_id))
            }
            Dialect::TransactionWrappedPostgres => {
                debug!(%target, "Creating no-op locking strategy");
                Arc::new(NoOpLockingStrategy::new())
            }
        };
        Ok(strategy)
    }

    /// Create the strategy described by a database configuration section
    pub fn from_config(config: &DatabaseConfig) -> Result<SharedLockingStrategy> {
        Self::create(
            &config.dialect,
            config.url.clone(),
            Some(config.advisory_lock_id),
        )
    }
}
