//! Unit tests for the writer lock bootstrap

use std::sync::Arc;
use std::time::Duration;
use wlock_domain::ports::SharedLockingStrategy;
use wlock_domain::value_objects::{AdvisoryLockId, LockStatus, StrategyKind};
use wlock_infrastructure::bootstrap::WriterLock;
use wlock_infrastructure::config::DatabaseConfig;
use wlock_infrastructure::shutdown::ShutdownSignal;
use wlock_providers::{AdvisoryLockStrategy, InMemoryLockServer};

fn test_config(lock_id: AdvisoryLockId) -> DatabaseConfig {
    DatabaseConfig {
        url: "postgres://app:secret@db/app".into(),
        advisory_lock_id: lock_id,
        lock_timeout: Duration::from_millis(200),
        ensure_timeout: Duration::from_millis(100),
        release_timeout: Duration::from_secs(1),
        probe_interval: Duration::from_millis(50),
        probe_timeout: Duration::from_millis(50),
        ..DatabaseConfig::default()
    }
}

fn strategy(server: &InMemoryLockServer, config: &DatabaseConfig) -> SharedLockingStrategy {
    Arc::new(AdvisoryLockStrategy::new(
        Arc::new(server.connector(config.url.clone())),
        config.advisory_lock_id,
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_acquire_and_release() {
    let server = InMemoryLockServer::new();
    let config = test_config(AdvisoryLockId::new(rand::random::<i64>()));

    let writer = WriterLock::acquire_with(strategy(&server, &config), &config, ShutdownSignal::new())
        .await
        .expect("uncontended acquisition");
    assert!(server.is_locked(config.advisory_lock_id));
    assert_eq!(writer.strategy().status(), LockStatus::Held);
    writer.access().ensure().expect("gate passes");

    writer.release().await.expect("release");
    assert!(!server.is_locked(config.advisory_lock_id));
    assert_eq!(server.live_sessions(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_second_writer_times_out() {
    let server = InMemoryLockServer::new();
    let config = test_config(AdvisoryLockId::new(rand::random::<i64>()));

    let first = WriterLock::acquire_with(strategy(&server, &config), &config, ShutdownSignal::new())
        .await
        .expect("first writer");
    let err = WriterLock::acquire_with(strategy(&server, &config), &config, ShutdownSignal::new())
        .await
        .expect_err("second writer must wait for the first");
    assert!(err.is_no_advisory_lock(), "got {err:?}");

    first.release().await.expect("release");
    let second = WriterLock::acquire_with(strategy(&server, &config), &config, ShutdownSignal::new())
        .await
        .expect("second writer after release");
    second.release().await.expect("release");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_disconnect_fires_signal_and_successor_acquires() {
    let server = InMemoryLockServer::new();
    let config = test_config(AdvisoryLockId::new(rand::random::<i64>()));
    let signal = ShutdownSignal::new();

    let writer = WriterLock::acquire_with(strategy(&server, &config), &config, signal.clone())
        .await
        .expect("first writer");
    assert!(server.terminate_holder(config.advisory_lock_id));

    tokio::time::timeout(Duration::from_secs(2), signal.wait())
        .await
        .expect("disconnect detected");
    assert!(writer.access().ensure().expect_err("shut down").to_string().contains("Shutting down"));

    let successor =
        WriterLock::acquire_with(strategy(&server, &config), &config, ShutdownSignal::new())
            .await
            .expect("successor takes over");

    writer.release().await.expect("releasing a lost lock is not an error");
    assert!(server.is_locked(config.advisory_lock_id), "successor still holds it");
    successor.release().await.expect("release");
}

#[tokio::test]
async fn test_txdb_config_uses_noop_strategy() {
    let config = DatabaseConfig {
        dialect: "txdb".to_string(),
        ..test_config(AdvisoryLockId::PRODUCTION)
    };
    let writer = WriterLock::acquire(&config, ShutdownSignal::new())
        .await
        .expect("noop acquisition never connects");
    assert_eq!(writer.strategy().kind(), StrategyKind::NoOp);
    writer.access().ensure().expect("gate passes");
    writer.release().await.expect("release");
}

#[tokio::test]
async fn test_unknown_dialect_fails_before_locking() {
    let config = DatabaseConfig {
        dialect: "oracle".to_string(),
        ..test_config(AdvisoryLockId::PRODUCTION)
    };
    let err = WriterLock::acquire(&config, ShutdownSignal::new())
        .await
        .expect_err("oracle is not supported");
    assert!(err.is_unsupported_dialect());
}
