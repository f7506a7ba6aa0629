//! Writer lock bootstrap
//!
//! Startup sequence for a process that must be the only writer of its
//! database: build the strategy from configuration, take the lock (waiting
//! for the previous holder when the timeout is zero), then watch the lock
//! session for the rest of the process lifetime.
//!
//! ```ignore
//! let signal = ShutdownSignal::new();
//! let writer = WriterLock::acquire(&config.database, signal.clone()).await?;
//! run_migrations(writer.access())?;
//!
//! signal.wait().await;
//! writer.release().await?;
//! ```

use crate::config::DatabaseConfig;
use crate::detector::{DetectorHandle, DisconnectDetector, ExclusiveAccess};
use crate::locking::LockingStrategyFactory;
use crate::shutdown::ShutdownSignal;
use std::sync::Arc;
use tracing::info;
use wlock_domain::error::{Error, Result, display_timeout};
use wlock_domain::ports::SharedLockingStrategy;
use wlock_domain::value_objects::StrategyKind;

/// Exclusive writer lock held for the lifetime of the process
#[derive(Debug)]
pub struct WriterLock {
    strategy: SharedLockingStrategy,
    access: ExclusiveAccess,
    detector: Option<DetectorHandle>,
    config: DatabaseConfig,
}

impl WriterLock {
    /// Build the strategy from `config` and take the lock
    pub async fn acquire(config: &DatabaseConfig, signal: ShutdownSignal) -> Result<Self> {
        let strategy = LockingStrategyFactory::from_config(config)?;
        Self::acquire_with(strategy, config, signal).await
    }

    /// Take the lock through an already built strategy
    pub async fn acquire_with(
        strategy: SharedLockingStrategy,
        config: &DatabaseConfig,
        signal: ShutdownSignal,
    ) -> Result<Self> {
        info!(
            kind = ?strategy.kind(),
            lock_id = %config.advisory_lock_id,
            timeout = %display_timeout(&config.lock_timeout),
            "Acquiring exclusive database lock"
        );
        let locking = Arc::clone(&strategy);
        let timeout = config.lock_timeout;
        tokio::task::spawn_blocking(move || locking.lock(timeout))
            .await
            .map_err(|e| Error::internal(format!("lock task failed: {e}")))??;

        let detector = (strategy.kind() == StrategyKind::AdvisoryLock).then(|| {
            DisconnectDetector::new(
                Arc::clone(&strategy),
                signal.clone(),
                config.probe_interval,
                config.probe_timeout,
            )
            .spawn()
        });
        let access = ExclusiveAccess::new(Arc::clone(&strategy), signal, config.ensure_timeout);

        Ok(Self {
            strategy,
            access,
            detector,
            config: config.clone(),
        })
    }

    /// Write gate to pass to migration and data-access code
    pub fn access(&self) -> &ExclusiveAccess {
        &self.access
    }

    /// Underlying locking strategy
    pub fn strategy(&self) -> &SharedLockingStrategy {
        &self.strategy
    }

    /// Shutdown signal shared with the gate and the detector
    pub fn signal(&self) -> &ShutdownSignal {
        self.access.signal()
    }

    /// Stop the detector and release the lock
    pub async fn release(self) -> Result<()> {
        if let Some(detector) = self.detector {
            detector.stop().await;
        }
        let strategy = self.strategy;
        let timeout = self.config.release_timeout;
        tokio::task::spawn_blocking(move || strategy.unlock(timeout))
            .await
            .map_err(|e| Error::internal(format!("unlock task failed: {e}")))?
    }
}
