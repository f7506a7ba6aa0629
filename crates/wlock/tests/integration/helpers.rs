//! Helpers for tests against a live PostgreSQL server
//!
//! Point `WLOCK_TEST_DATABASE_URL` at a disposable database to run them;
//! without it every test is skipped.

use r2d2_postgres::postgres::{Client, NoTls};
use wlock::AdvisoryLockId;

/// Environment variable holding the test database URL
pub const TEST_DATABASE_URL_ENV: &str = "WLOCK_TEST_DATABASE_URL";

/// Test database URL, if configured
pub fn test_database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Skip the current test unless a PostgreSQL test database is configured.
///
/// Binds the URL to the given identifier.
#[macro_export]
macro_rules! require_postgres {
    ($url:ident) => {
        let Some($url) = $crate::helpers::test_database_url() else {
            println!(
                "⊘ SKIPPED: {} not set (skipping test)",
                $crate::helpers::TEST_DATABASE_URL_ENV
            );
            return;
        };
    };
}

/// Positive random lock id so parallel runs never collide
pub fn random_lock_id() -> AdvisoryLockId {
    AdvisoryLockId::new(rand::random_range(1..i64::MAX))
}

/// Separate administrative session, never holding advisory locks itself
pub fn admin_client(url: &str) -> Client {
    Client::connect(url, NoTls).expect("admin connection to test database")
}

/// Whether any session holds the advisory lock `lock_id`
pub fn is_advisory_locked(admin: &mut Client, lock_id: AdvisoryLockId) -> bool {
    let row = admin
        .query_one(
            "SELECT count(*) FROM pg_locks \
             WHERE locktype = 'advisory' AND granted AND objsubid = 1 \
             AND ((classid::bigint << 32) | objid::bigint) = $1",
            &[&lock_id.get()],
        )
        .expect("query pg_locks");
    row.get::<_, i64>(0) > 0
}

/// Forcibly terminate the backend holding `lock_id`, like a DBA or a
/// failover would. Returns the number of terminated sessions.
pub fn terminate_lock_holder(admin: &mut Client, lock_id: AdvisoryLockId) -> usize {
    let rows = admin
        .query(
            "SELECT pg_terminate_backend(pid) FROM pg_locks \
             WHERE locktype = 'advisory' AND granted AND objsubid = 1 \
             AND ((classid::bigint << 32) | objid::bigint) = $1",
            &[&lock_id.get()],
        )
        .expect("terminate lock holder");
    rows.len()
}
