//! Loss-of-exclusivity detection
//!
//! Two complementary checks end in the same [`ShutdownSignal`](crate::shutdown::ShutdownSignal):
//!
//! - [`ExclusiveAccess`] re-asserts the lock synchronously before writes
//! - [`DisconnectDetector`] probes the lock session in the background

pub mod gate;
pub mod watchdog;

pub use gate::ExclusiveAccess;
pub use watchdog::{DetectorHandle, DisconnectDetector};
