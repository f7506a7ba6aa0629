//! Application configuration root

use super::{DatabaseConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database and lock settings
    pub database: DatabaseConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}
