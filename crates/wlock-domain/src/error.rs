//! Error handling types

use crate::value_objects::{AdvisoryLockId, ConnectionTarget};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed foreign error carried as a source
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for wlock
#[derive(Error, Debug)]
pub enum Error {
    /// The strategy factory was given a dialect tag it does not know
    #[error("unable to create locking strategy for dialect '{dialect}' and target {target}")]
    UnsupportedDialect {
        /// The unrecognized dialect tag
        dialect: String,
        /// Connection target the strategy was requested for (redacted on display)
        target: ConnectionTarget,
    },

    /// Failure to open or keep the dedicated lock session
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The driver reports the session as already closed
    #[error("Connection closed: {message}")]
    ConnectionClosed {
        /// What was being attempted when the closed session was noticed
        message: String,
    },

    /// Acquisition was attempted but did not complete in time
    #[error(
        "advisory locking strategy failed to acquire lock {lock_id}, timeout set to {}: {source}",
        display_timeout(.timeout)
    )]
    NoAdvisoryLock {
        /// The contended lock identifier
        lock_id: AdvisoryLockId,
        /// Timeout the acquisition was bounded by (zero means indefinite)
        timeout: Duration,
        /// Underlying driver or timeout error
        source: Box<Error>,
    },

    /// Database statement error
    #[error("Database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// One or more sub-resources failed to close while releasing the lock
    #[error("failed to close advisory lock session: {}", join_failures(.failures))]
    Close {
        /// Every close failure, in the order they were attempted
        failures: Vec<Error>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Writes are refused because the shutdown signal has fired
    #[error("Shutting down: {reason}")]
    ShuttingDown {
        /// Reason recorded when the signal fired
        reason: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

/// Render a lock timeout for diagnostics; zero means the wait was unbounded.
pub fn display_timeout(timeout: &Duration) -> String {
    if timeout.is_zero() {
        "indefinite".to_string()
    } else {
        humantime::format_duration(*timeout).to_string()
    }
}

fn join_failures(failures: &[Error]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Connection error creation methods
impl Error {
    /// Create a connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with source
    pub fn connection_with_source<S: Into<String>, E: Into<BoxError>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a connection-closed error
    pub fn connection_closed<S: Into<String>>(message: S) -> Self {
        Self::ConnectionClosed {
            message: message.into(),
        }
    }
}

// Database error creation methods
impl Error {
    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create a database error with source
    pub fn database_with_source<S: Into<String>, E: Into<BoxError>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: Into<BoxError>>(message: S, source: E) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// Locking error creation methods
impl Error {
    /// Create an unsupported dialect error
    pub fn unsupported_dialect<S: Into<String>>(dialect: S, target: ConnectionTarget) -> Self {
        Self::UnsupportedDialect {
            dialect: dialect.into(),
            target,
        }
    }

    /// Wrap an acquisition failure as `NoAdvisoryLock`
    pub fn no_advisory_lock(lock_id: AdvisoryLockId, timeout: Duration, source: Error) -> Self {
        Self::NoAdvisoryLock {
            lock_id,
            timeout,
            source: Box::new(source),
        }
    }

    /// Create a shutting down error
    pub fn shutting_down<S: Into<String>>(reason: S) -> Self {
        Self::ShuttingDown {
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether this is a failed (contended or timed out) lock acquisition
    pub fn is_no_advisory_lock(&self) -> bool {
        matches!(self, Self::NoAdvisoryLock { .. })
    }

    /// Whether the driver reported the session as already gone
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, Self::ConnectionClosed { .. })
    }

    /// Whether the strategy factory rejected the dialect
    pub fn is_unsupported_dialect(&self) -> bool {
        matches!(self, Self::UnsupportedDialect { .. })
    }
}
