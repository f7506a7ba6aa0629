//! # Infrastructure Layer
//!
//! Wiring and runtime concerns around the locking core. Strategy and session
//! implementations live in the wlock-providers crate.
//!
//! ## Module Categories
//!
//! ### Locking
//! | Module | Description |
//! |--------|-------------|
//! | [`locking`] | Dialect-driven strategy factory |
//! | [`detector`] | Write gate and disconnect watchdog |
//! | [`shutdown`] | One-shot shutdown signal |
//! | [`bootstrap`] | Acquire-at-startup writer lock handle |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration |
//! | [`constants`] | Centralized configuration constants |
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod detector;
pub mod locking;
pub mod logging;
pub mod shutdown;

pub use bootstrap::WriterLock;
pub use config::{AppConfig, ConfigLoader, DatabaseConfig, LoggingConfig};
pub use detector::{DetectorHandle, DisconnectDetector, ExclusiveAccess};
pub use locking::LockingStrategyFactory;
pub use shutdown::ShutdownSignal;
pub use wlock_domain::error_ext::ErrorContext;
