//! Unit tests for the write gate
//!
//! A session terminated on the in-memory server stands in for a network
//! partition: the server frees the advisory lock while the process still
//! believes it holds it.

use std::sync::Arc;
use std::time::Duration;
use wlock_domain::error::Error;
use wlock_domain::ports::{LockingStrategy, SharedLockingStrategy};
use wlock_domain::value_objects::{AdvisoryLockId, LockStatus};
use wlock_infrastructure::detector::ExclusiveAccess;
use wlock_infrastructure::shutdown::ShutdownSignal;
use wlock_providers::{AdvisoryLockStrategy, InMemoryLockServer, NoOpLockingStrategy};

const TARGET: &str = "postgres://app:secret@db:5432/app";
const ENSURE_TIMEOUT: Duration = Duration::from_millis(100);

fn advisory(server: &InMemoryLockServer, lock_id: AdvisoryLockId) -> SharedLockingStrategy {
    Arc::new(AdvisoryLockStrategy::new(
        Arc::new(server.connector(TARGET)),
        lock_id,
    ))
}

// =============================================================================
// Healthy session
// =============================================================================

#[test]
fn test_ensure_on_held_lock_is_reentrant() {
    let server = InMemoryLockServer::new();
    let strategy = advisory(&server, AdvisoryLockId::new(rand::random::<i64>()));
    strategy.lock(Duration::from_secs(1)).expect("startup lock");

    let gate = ExclusiveAccess::new(strategy, ShutdownSignal::new(), ENSURE_TIMEOUT);
    gate.ensure().expect("still the writer");
    gate.ensure().expect("still the writer");

    assert_eq!(server.dial_count(), 1);
    assert!(!gate.signal().is_fired());
}

#[test]
fn test_run_executes_write_when_exclusive() {
    let server = InMemoryLockServer::new();
    let strategy = advisory(&server, AdvisoryLockId::new(rand::random::<i64>()));
    let gate = ExclusiveAccess::new(strategy, ShutdownSignal::new(), ENSURE_TIMEOUT);

    let rows = gate.run(|| Ok(3)).expect("write runs");
    assert_eq!(rows, 3);
}

#[test]
fn test_noop_gate_always_passes() {
    let gate = ExclusiveAccess::new(
        Arc::new(NoOpLockingStrategy::new()),
        ShutdownSignal::new(),
        ENSURE_TIMEOUT,
    );
    gate.ensure().expect("noop never loses exclusivity");
    assert_eq!(gate.strategy().status(), LockStatus::Unheld);
}

// =============================================================================
// Lost session
// =============================================================================

#[test]
fn test_ensure_reacquires_when_nobody_took_over() {
    let server = InMemoryLockServer::new();
    let lock_id = AdvisoryLockId::new(rand::random::<i64>());
    let strategy = advisory(&server, lock_id);
    strategy.lock(Duration::from_secs(1)).expect("startup lock");
    assert!(server.terminate_holder(lock_id));

    let gate = ExclusiveAccess::new(strategy, ShutdownSignal::new(), ENSURE_TIMEOUT);
    gate.ensure().expect("fresh session takes the free lock");

    assert!(server.is_locked(lock_id));
    assert!(!gate.signal().is_fired());
}

#[test]
fn test_ensure_fires_shutdown_when_another_instance_took_over() {
    let server = InMemoryLockServer::new();
    let lock_id = AdvisoryLockId::new(rand::random::<i64>());
    let original = advisory(&server, lock_id);
    original.lock(Duration::from_secs(1)).expect("startup lock");

    assert!(server.terminate_holder(lock_id));
    let successor = advisory(&server, lock_id);
    successor
        .lock(Duration::from_millis(200))
        .expect("second instance takes over");

    let signal = ShutdownSignal::new();
    let gate = ExclusiveAccess::new(original, signal.clone(), ENSURE_TIMEOUT);
    let mut wrote = false;
    let err = gate
        .run(|| {
            wrote = true;
            Ok(())
        })
        .expect_err("original must stop writing");

    assert!(err.is_no_advisory_lock(), "got {err:?}");
    assert!(!wrote, "write must not run without exclusivity");
    assert!(signal.is_fired());
    assert!(signal.reason().is_some_and(|r| r.contains("advisory lock")));
}

#[test]
fn test_ensure_refuses_after_shutdown() {
    let server = InMemoryLockServer::new();
    let strategy = advisory(&server, AdvisoryLockId::new(rand::random::<i64>()));
    let signal = ShutdownSignal::new();
    signal.fire("operator requested stop");

    let gate = ExclusiveAccess::new(strategy, signal, ENSURE_TIMEOUT);
    match gate.ensure() {
        Err(Error::ShuttingDown { reason }) => assert_eq!(reason, "operator requested stop"),
        other => panic!("Expected ShuttingDown, got {other:?}"),
    }
    assert_eq!(server.dial_count(), 0, "no lock attempt after shutdown");
}

#[test]
fn test_connection_failure_does_not_fire_shutdown() {
    let server = InMemoryLockServer::new();
    let strategy = advisory(&server, AdvisoryLockId::new(rand::random::<i64>()));
    server.set_refuse_connections(true);

    let gate = ExclusiveAccess::new(strategy, ShutdownSignal::new(), ENSURE_TIMEOUT);
    let err = gate.ensure().expect_err("database unreachable");
    assert!(matches!(err, Error::Connection { .. }), "got {err:?}");
    assert!(!gate.signal().is_fired());
}
