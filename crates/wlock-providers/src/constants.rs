//! Provider constants

use std::time::Duration;

/// `application_name` reported by lock sessions in `pg_stat_activity`
pub const LOCK_SESSION_APPLICATION_NAME: &str = "wlock";

/// Idle time before TCP keepalive probes start on a lock session
pub const LOCK_SESSION_KEEPALIVE_IDLE: Duration = Duration::from_secs(30);

/// Smallest acquisition bound handed to a session once dialing used up the
/// caller's timeout
pub const MIN_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(1);

/// Largest value PostgreSQL accepts for `lock_timeout` / `statement_timeout`
pub const MAX_SESSION_TIMEOUT_MILLIS: u128 = i32::MAX as u128;
