//! Infrastructure layer constants
//!
//! Domain-level constants (production lock id, dialect tags) live in
//! `wlock_domain::constants`.

use std::time::Duration;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wlock.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wlock";

/// Environment variable prefix for configuration (`WLOCK__DATABASE__URL`)
pub const CONFIG_ENV_PREFIX: &str = "WLOCK";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOCKING CONSTANTS
// ============================================================================

/// Startup acquisition timeout; zero waits until the current holder goes away
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::ZERO;

/// Timeout for re-asserting the lock before write traffic
pub const DEFAULT_ENSURE_TIMEOUT: Duration = Duration::from_millis(500);

/// Timeout for releasing the lock on shutdown
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval between liveness probes of the lock session
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(5);

/// Bound on a single liveness probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WLOCK_LOG";

/// File stem used for rotated log files
pub const LOG_FILE_STEM: &str = "wlock";
