//! In-memory lock sessions
//!
//! A process-local stand-in for a database server with session advisory
//! locks. Locks are reentrant per session, blocked acquisitions wait on a
//! condition variable bounded by the timeout, and closing or terminating a
//! session releases everything it held.
//!
//! Useful for exercising strategies without PostgreSQL: the server counts
//! dial attempts, can refuse connections, can terminate the session holding
//! a lock (like `pg_terminate_backend`) and can inject close failures.
//! Sessions can also be made to notice termination only on their next round
//! trip, the way a real driver does, and dialing can be slowed down.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use wlock_domain::error::{Error, Result};
use wlock_domain::ports::{LockSession, SessionConnector};
use wlock_domain::value_objects::{AdvisoryLockId, ConnectionTarget};

type SessionId = u64;

#[derive(Default)]
struct ServerState {
    next_session: SessionId,
    live_sessions: HashSet<SessionId>,
    /// lock id -> (holding session, reentrancy count)
    holders: HashMap<i64, (SessionId, u64)>,
    dials: u64,
    refuse_connections: bool,
    fail_release: bool,
    fail_close: bool,
    lazy_disconnect_detection: bool,
    connect_delay: Duration,
}

impl ServerState {
    fn drop_session(&mut self, session: SessionId) {
        self.live_sessions.remove(&session);
        self.holders.retain(|_, (holder, _)| *holder != session);
    }
}

#[derive(Default)]
struct ServerInner {
    state: Mutex<ServerState>,
    released: Condvar,
}

/// Shared in-memory lock server
#[derive(Clone, Default)]
pub struct InMemoryLockServer {
    inner: Arc<ServerInner>,
}

impl InMemoryLockServer {
    /// Create an empty server
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ServerState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Connector dialing this server
    pub fn connector<T: Into<ConnectionTarget>>(&self, target: T) -> InMemorySessionConnector {
        InMemorySessionConnector {
            server: self.clone(),
            target: target.into(),
        }
    }

    /// Number of `connect` attempts so far, refused ones included
    pub fn dial_count(&self) -> u64 {
        self.state().dials
    }

    /// Number of open sessions
    pub fn live_sessions(&self) -> usize {
        self.state().live_sessions.len()
    }

    /// Whether any session holds `lock_id`
    pub fn is_locked(&self, lock_id: AdvisoryLockId) -> bool {
        self.state().holders.contains_key(&lock_id.get())
    }

    /// Make subsequent `connect` calls fail
    pub fn set_refuse_connections(&self, refuse: bool) {
        self.state().refuse_connections = refuse;
    }

    /// Make sessions report termination only after a round trip.
    ///
    /// While enabled, `is_closed` stays false for a terminated session until
    /// `acquire`, `release_all` or `is_alive` runs into the dead connection.
    pub fn set_lazy_disconnect_detection(&self, lazy: bool) {
        self.state().lazy_disconnect_detection = lazy;
    }

    /// Delay every subsequent `connect` by `delay`
    pub fn set_connect_delay(&self, delay: Duration) {
        self.state().connect_delay = delay;
    }

    /// Make subsequent releases and/or closes report a failure.
    ///
    /// The session is still torn down; only the reported result changes.
    pub fn set_close_failures(&self, release: bool, close: bool) {
        let mut state = self.state();
        state.fail_release = release;
        state.fail_close = close;
    }

    /// Terminate the session holding `lock_id`, releasing its locks.
    ///
    /// Returns whether a session was terminated.
    pub fn terminate_holder(&self, lock_id: AdvisoryLockId) -> bool {
        let mut state = self.state();
        let Some(&(holder, _)) = state.holders.get(&lock_id.get()) else {
            return false;
        };
        state.drop_session(holder);
        drop(state);
        self.inner.released.notify_all();
        true
    }
}

impl std::fmt::Debug for InMemoryLockServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("InMemoryLockServer")
            .field("live_sessions", &state.live_sessions.len())
            .field("held_locks", &state.holders.len())
            .field("dials", &state.dials)
            .finish()
    }
}

/// Opens sessions on an [`InMemoryLockServer`]
///
/// Dialing never times out: `connect` ignores its timeout, sleeps for the
/// server's connect delay (zero by default) and then either opens a session
/// or reports a refusal.
#[derive(Debug, Clone)]
pub struct InMemorySessionConnector {
    server: InMemoryLockServer,
    target: ConnectionTarget,
}

impl SessionConnector for InMemorySessionConnector {
    fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    fn connect(&self, _timeout: Duration) -> Result<Box<dyn LockSession>> {
        let delay = self.server.state().connect_delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let mut state = self.server.state();
        state.dials += 1;
        if state.refuse_connections {
            return Err(Error::connection(format!(
                "connection to {} refused",
                self.target
            )));
        }
        state.next_session += 1;
        let id = state.next_session;
        state.live_sessions.insert(id);
        Ok(Box::new(InMemoryLockSession {
            server: self.server.clone(),
            id,
            noticed_closed: false,
        }))
    }
}

/// One session on an [`InMemoryLockServer`]
#[derive(Debug)]
pub struct InMemoryLockSession {
    server: InMemoryLockServer,
    id: SessionId,
    /// A round trip already ran into the terminated session
    noticed_closed: bool,
}

impl InMemoryLockSession {
    fn is_live(&self, state: &ServerState) -> bool {
        state.live_sessions.contains(&self.id)
    }
}

impl LockSession for InMemoryLockSession {
    fn acquire(&mut self, lock_id: AdvisoryLockId, timeout: Duration) -> Result<()> {
        let deadline = (!timeout.is_zero()).then(|| Instant::now() + timeout);
        let mut state = self.server.state();
        loop {
            if !self.is_live(&state) {
                self.noticed_closed = true;
                return Err(Error::connection_closed("session terminated"));
            }
            match state.holders.get_mut(&lock_id.get()) {
                None => {
                    state.holders.insert(lock_id.get(), (self.id, 1));
                    return Ok(());
                }
                Some((holder, count)) if *holder == self.id => {
                    *count += 1;
                    return Ok(());
                }
                Some(_) => {}
            }
            state = match deadline {
                None => self
                    .server
                    .inner
                    .released
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner),
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(Error::database("canceling statement due to lock timeout"));
                    }
                    self.server
                        .inner
                        .released
                        .wait_timeout(state, remaining)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }
    }

    fn release_all(&mut self, _timeout: Duration) -> Result<()> {
        let mut state = self.server.state();
        if !self.is_live(&state) {
            self.noticed_closed = true;
            return Err(Error::connection_closed("session terminated"));
        }
        let id = self.id;
        state.holders.retain(|_, (holder, _)| *holder != id);
        let fail = state.fail_release;
        drop(state);
        self.server.inner.released.notify_all();
        if fail {
            return Err(Error::database("injected release failure"));
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        let state = self.server.state();
        if state.lazy_disconnect_detection {
            self.noticed_closed
        } else {
            !self.is_live(&state)
        }
    }

    fn is_alive(&mut self, _timeout: Duration) -> bool {
        let alive = self.is_live(&self.server.state());
        if !alive {
            self.noticed_closed = true;
        }
        alive
    }

    fn close(self: Box<Self>) -> Result<()> {
        let mut state = self.server.state();
        if !state.live_sessions.contains(&self.id) {
            return Err(Error::connection_closed("closing session"));
        }
        state.drop_session(self.id);
        let fail = state.fail_close;
        drop(state);
        self.server.inner.released.notify_all();
        if fail {
            return Err(Error::connection("injected close failure"));
        }
        Ok(())
    }
}

impl Drop for InMemoryLockSession {
    fn drop(&mut self) {
        let mut state = self.server.state();
        if state.live_sessions.contains(&self.id) {
            state.drop_session(self.id);
            drop(state);
            self.server.inner.released.notify_all();
        }
    }
}
