//! Configuration
//!
//! Figment-based layered configuration: defaults, then `wlock.toml`, then
//! `WLOCK__`-prefixed environment variables.

pub mod duration;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DatabaseConfig, LoggingConfig};
