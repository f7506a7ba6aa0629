//! Domain constants

/// Advisory lock identifier shared by every production deployment.
///
/// All contenders for the database must agree on this value; tests override it
/// so parallel runs do not collide.
pub const PRODUCTION_ADVISORY_LOCK_ID: i64 = 1_027_321_974_924_625_846;

/// Dialect tag for a PostgreSQL backend with session advisory locks
pub const DIALECT_POSTGRES: &str = "postgres";

/// Dialect tag for the transaction-wrapped PostgreSQL test backend
pub const DIALECT_TRANSACTION_WRAPPED_POSTGRES: &str = "txdb";

/// Replacement text for secrets in connection targets
pub const REDACTED_SECRET: &str = "***";
