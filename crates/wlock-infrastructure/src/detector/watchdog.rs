//! Disconnect detector
//!
//! Background task probing the lock session on a fixed interval. A network
//! partition or a terminated backend silently frees the advisory lock on the
//! server, so without this task the process would keep writing while another
//! instance already took over.
//!
//! ```text
//!  tick ──▶ probe (blocking pool)
//!             ├─ Held / Unheld ──▶ wait for next tick
//!             ├─ Lost ───────────▶ fire shutdown signal, stop
//!             └─ Err ────────────▶ warn, retry next tick
//! ```

use crate::shutdown::ShutdownSignal;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wlock_domain::ports::SharedLockingStrategy;
use wlock_domain::value_objects::LockStatus;

/// Periodic liveness probe of a locking strategy
#[derive(Debug, Clone)]
pub struct DisconnectDetector {
    strategy: SharedLockingStrategy,
    signal: ShutdownSignal,
    interval: Duration,
    probe_timeout: Duration,
}

impl DisconnectDetector {
    /// Create a detector; nothing runs until [`spawn`](Self::spawn)
    pub fn new(
        strategy: SharedLockingStrategy,
        signal: ShutdownSignal,
        interval: Duration,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            strategy,
            signal,
            interval,
            probe_timeout,
        }
    }

    /// Start probing on the current tokio runtime
    pub fn spawn(self) -> DetectorHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        DetectorHandle { cancel, task }
    }

    async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the lock was just taken
        ticker.tick().await;

        debug!(interval = ?self.interval, "Disconnect detector started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("Disconnect detector cancelled");
                    break;
                }
                () = self.signal.wait() => {
                    debug!("Disconnect detector stopping, shutdown already signaled");
                    break;
                }
                _ = ticker.tick() => {
                    if self.probe_once().await == Some(LockStatus::Lost) {
                        self.signal.fire("advisory lock session lost");
                        break;
                    }
                }
            }
        }
    }

    async fn probe_once(&self) -> Option<LockStatus> {
        let strategy = Arc::clone(&self.strategy);
        let timeout = self.probe_timeout;
        match tokio::task::spawn_blocking(move || strategy.probe(timeout)).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(err)) => {
                warn!(error = %err, "Lock session probe failed, retrying next tick");
                None
            }
            Err(join_err) => {
                warn!(error = %join_err, "Lock session probe task failed, retrying next tick");
                None
            }
        }
    }
}

/// Handle to a running [`DisconnectDetector`]
#[derive(Debug)]
pub struct DetectorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl DetectorHandle {
    /// Whether the detector task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the detector and wait for the task to exit
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            warn!(error = %err, "Disconnect detector task ended abnormally");
        } else {
            info!("Disconnect detector stopped");
        }
    }
}
