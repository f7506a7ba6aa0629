//! Backend dialect tags

use crate::constants::{DIALECT_POSTGRES, DIALECT_TRANSACTION_WRAPPED_POSTGRES};
use crate::error::{Error, Result};
use crate::value_objects::ConnectionTarget;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend/mode tag selecting which locking variant applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// PostgreSQL with session advisory locks
    #[serde(rename = "postgres")]
    Postgres,
    /// PostgreSQL where every caller runs inside its own wrapping transaction
    #[serde(rename = "txdb")]
    TransactionWrappedPostgres,
}

impl Dialect {
    /// Parse a dialect tag (case-insensitive, surrounding whitespace ignored).
    ///
    /// `target` is only used to build the `UnsupportedDialect` diagnostic.
    pub fn parse(tag: &str, target: &ConnectionTarget) -> Result<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            DIALECT_POSTGRES => Ok(Self::Postgres),
            DIALECT_TRANSACTION_WRAPPED_POSTGRES => Ok(Self::TransactionWrappedPostgres),
            _ => Err(Error::unsupported_dialect(tag, target.clone())),
        }
    }

    /// The canonical tag
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => DIALECT_POSTGRES,
            Self::TransactionWrappedPostgres => DIALECT_TRANSACTION_WRAPPED_POSTGRES,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
