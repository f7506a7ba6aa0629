//! Unit tests for domain error types

use std::time::Duration;
use wlock_domain::{AdvisoryLockId, ConnectionTarget, Error};

#[test]
fn test_unsupported_dialect_error() {
    let error = Error::unsupported_dialect(
        "sqlite3",
        ConnectionTarget::new("postgres://app:hunter2@db:5432/app"),
    );
    match &error {
        Error::UnsupportedDialect { dialect, target } => {
            assert_eq!(dialect, "sqlite3");
            assert_eq!(target.as_str(), "postgres://app:hunter2@db:5432/app");
        }
        _ => panic!("Expected UnsupportedDialect error"),
    }
    let display_str = error.to_string();
    assert!(display_str.contains("sqlite3"));
    assert!(display_str.contains("db:5432"));
    assert!(!display_str.contains("hunter2"));
    assert!(error.is_unsupported_dialect());
}

#[test]
fn test_connection_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::connection_with_source("failed to open lock session", io);
    match &error {
        Error::Connection { message, source } => {
            assert_eq!(message, "failed to open lock session");
            assert!(source.is_some());
        }
        _ => panic!("Expected Connection error"),
    }
    assert!(!error.is_no_advisory_lock());
    assert!(!error.is_connection_closed());
}

#[test]
fn test_connection_closed_classification() {
    let error = Error::connection_closed("closing lock session");
    assert!(error.is_connection_closed());
    assert!(!error.is_no_advisory_lock());
}

#[test]
fn test_no_advisory_lock_keeps_diagnostics() {
    let error = Error::no_advisory_lock(
        AdvisoryLockId::new(7),
        Duration::from_millis(200),
        Error::database("lock timeout"),
    );
    match &error {
        Error::NoAdvisoryLock {
            lock_id,
            timeout,
            source,
        } => {
            assert_eq!(lock_id.get(), 7);
            assert_eq!(*timeout, Duration::from_millis(200));
            assert!(source.to_string().contains("lock timeout"));
        }
        _ => panic!("Expected NoAdvisoryLock error"),
    }
}

#[test]
fn test_no_advisory_lock_indefinite_timeout_display() {
    let error = Error::no_advisory_lock(
        AdvisoryLockId::new(7),
        Duration::ZERO,
        Error::database("terminated"),
    );
    assert!(error.to_string().contains("indefinite"));
}

#[test]
fn test_shutting_down_error() {
    let error = Error::shutting_down("advisory lock session lost");
    match error {
        Error::ShuttingDown { reason } => assert_eq!(reason, "advisory lock session lost"),
        _ => panic!("Expected ShuttingDown error"),
    }
}

#[test]
fn test_io_error_from() {
    let io = std::io::Error::other("disk");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io { .. }));
}
