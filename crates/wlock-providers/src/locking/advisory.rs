//! Advisory-lock strategy
//!
//! Holds a session-level advisory lock on a single dedicated session.
//!
//! ## States
//!
//! ```text
//!            lock() ok
//!  Unheld ──────────────▶ Held
//!    ▲                     │
//!    │   unlock()          │ session found dead
//!    └─────────── Lost ◀───┘
//!        (reported once)
//! ```
//!
//! A session is present in the slot exactly while the lock is potentially
//! held. When `lock` itself finds the held session dead, the slot remembers
//! the loss until `probe` reports it, so the disconnect detector still sees
//! it. Every transition goes through the slot's mutex, which also serializes
//! `lock`/`unlock` from threads of the same process. Other processes are
//! excluded by the database.

use crate::constants::MIN_ACQUIRE_TIMEOUT;
use crate::utils::lock_mutex;
use std::fmt;
use std::sync::{Mutex, PoisonError, TryLockError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};
use wlock_domain::error::{Error, Result, display_timeout};
use wlock_domain::ports::{LockSession, LockingStrategy, SharedSessionConnector};
use wlock_domain::value_objects::{AdvisoryLockId, ConnectionTarget, LockStatus, StrategyKind};

#[derive(Default)]
struct TokenSlot {
    /// Lock token session; `Some` ⇔ Held
    session: Option<Box<dyn LockSession>>,
    /// A held session died and nobody has reported it yet
    lost: bool,
}

impl TokenSlot {
    fn status(&self) -> LockStatus {
        if self.session.is_some() {
            LockStatus::Held
        } else {
            LockStatus::Unheld
        }
    }
}

/// Exclusive access through a database session advisory lock
pub struct AdvisoryLockStrategy {
    connector: SharedSessionConnector,
    lock_id: AdvisoryLockId,
    slot: Mutex<TokenSlot>,
}

impl AdvisoryLockStrategy {
    /// Create an unheld strategy. No session is opened until the first `lock`.
    pub fn new(connector: SharedSessionConnector, lock_id: AdvisoryLockId) -> Self {
        Self {
            connector,
            lock_id,
            slot: Mutex::new(TokenSlot::default()),
        }
    }

    /// Identifier this strategy contends for
    pub fn lock_id(&self) -> AdvisoryLockId {
        self.lock_id
    }

    /// Target the token session connects to
    pub fn target(&self) -> &ConnectionTarget {
        self.connector.target()
    }
}

/// Close a session nobody will use again; failures are only logged.
fn discard_session(session: Box<dyn LockSession>) {
    if let Err(err) = session.close() {
        if !err.is_connection_closed() {
            debug!(error = %err, "Ignoring error while discarding lock session");
        }
    }
}

/// Acquisition budget left once dialing consumed part of `timeout`.
///
/// Zero keeps meaning "wait indefinitely"; a spent budget still gets one
/// minimal attempt instead of turning into an unbounded wait.
pub(crate) fn remaining_timeout(timeout: Duration, started: Instant) -> Duration {
    if timeout.is_zero() {
        return Duration::ZERO;
    }
    timeout
        .saturating_sub(started.elapsed())
        .max(MIN_ACQUIRE_TIMEOUT)
}

impl LockingStrategy for AdvisoryLockStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AdvisoryLock
    }

    fn lock(&self, timeout: Duration) -> Result<()> {
        let started = Instant::now();
        let mut slot = lock_mutex(&self.slot, "advisory lock session")?;

        if slot.session.as_ref().is_some_and(|session| session.is_closed()) {
            warn!(
                lock_id = %self.lock_id,
                target = %self.target(),
                "Advisory lock session was closed, opening a new one"
            );
            if let Some(stale) = slot.session.take() {
                discard_session(stale);
            }
            slot.lost = true;
        }

        let (mut session, fresh) = match slot.session.take() {
            Some(session) => (session, false),
            None => {
                debug!(lock_id = %self.lock_id, target = %self.target(), "Opening advisory lock session");
                (self.connector.connect(timeout)?, true)
            }
        };

        match session.acquire(self.lock_id, remaining_timeout(timeout, started)) {
            Ok(()) => {
                if fresh {
                    info!(lock_id = %self.lock_id, target = %self.target(), "Advisory lock acquired");
                } else {
                    trace!(lock_id = %self.lock_id, "Advisory lock re-asserted");
                }
                slot.session = Some(session);
                slot.lost = false;
                Ok(())
            }
            Err(err) if err.is_connection_closed() => {
                discard_session(session);
                if !fresh {
                    slot.lost = true;
                }
                warn!(
                    lock_id = %self.lock_id,
                    target = %self.target(),
                    error = %err,
                    "Advisory lock session closed during acquisition"
                );
                Err(Error::connection_with_source(
                    format!("advisory lock session to {} closed", self.target()),
                    err,
                ))
            }
            Err(err) => {
                // A session opened by this call never held the lock.
                if fresh {
                    discard_session(session);
                } else {
                    slot.session = Some(session);
                }
                warn!(
                    lock_id = %self.lock_id,
                    timeout = %display_timeout(&timeout),
                    error = %err,
                    "Failed to acquire advisory lock"
                );
                Err(Error::no_advisory_lock(self.lock_id, timeout, err))
            }
        }
    }

    fn unlock(&self, timeout: Duration) -> Result<()> {
        let mut slot = lock_mutex(&self.slot, "advisory lock session")?;
        slot.lost = false;
        let Some(mut session) = slot.session.take() else {
            return Ok(());
        };

        let mut failures = Vec::new();
        if !session.is_closed() {
            if let Err(err) = session.release_all(timeout) {
                if !err.is_connection_closed() {
                    failures.push(err);
                }
            }
        }
        if let Err(err) = session.close() {
            if !err.is_connection_closed() {
                failures.push(err);
            }
        }

        if failures.is_empty() {
            info!(lock_id = %self.lock_id, "Advisory lock released");
            Ok(())
        } else {
            warn!(
                lock_id = %self.lock_id,
                failures = failures.len(),
                "Advisory lock session did not close cleanly"
            );
            Err(Error::Close { failures })
        }
    }

    /// Blocks while another `lock`/`unlock` on this instance is in flight.
    fn status(&self) -> LockStatus {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status()
    }

    fn probe(&self, timeout: Duration) -> Result<LockStatus> {
        let mut guard = lock_mutex(&self.slot, "advisory lock session")?;
        let slot = &mut *guard;
        let alive = match slot.session.as_mut() {
            // `lock` already dropped a dead session; report the loss once
            None if std::mem::take(&mut slot.lost) => false,
            None => return Ok(LockStatus::Unheld),
            Some(session) => !session.is_closed() && session.is_alive(timeout),
        };
        if alive {
            return Ok(LockStatus::Held);
        }

        if let Some(dead) = slot.session.take() {
            discard_session(dead);
        }
        error!(
            lock_id = %self.lock_id,
            target = %self.target(),
            "Advisory lock session lost, lock is no longer held"
        );
        Ok(LockStatus::Lost)
    }
}

impl Drop for AdvisoryLockStrategy {
    fn drop(&mut self) {
        let slot = self
            .slot
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = slot.session.take() {
            debug!(lock_id = %self.lock_id, "Closing advisory lock session on drop");
            discard_session(session);
        }
    }
}

impl fmt::Debug for AdvisoryLockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("AdvisoryLockStrategy");
        debug
            .field("lock_id", &self.lock_id)
            .field("target", self.target());
        // Never wait behind an in-flight lock call just to format
        match self.slot.try_lock() {
            Ok(slot) => debug.field("status", &slot.status()),
            Err(TryLockError::Poisoned(poisoned)) => {
                debug.field("status", &poisoned.into_inner().status())
            }
            Err(TryLockError::WouldBlock) => debug.field("status", &format_args!("busy")),
        };
        debug.finish()
    }
}
