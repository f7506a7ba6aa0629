//! Configuration types module

pub mod app;
pub mod database;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;
