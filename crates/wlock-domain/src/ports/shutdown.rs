//! Shutdown Coordination Port

/// Process-wide "stop acting as the exclusive writer" notification
///
/// # Example
///
/// ```ignore
/// use wlock_domain::ports::ShutdownCoordinator;
/// use std::sync::Arc;
///
/// fn before_write(coordinator: Arc<dyn ShutdownCoordinator>) {
///     if coordinator.is_shutting_down() {
///         return;
///     }
///     // ...
/// }
/// ```
pub trait ShutdownCoordinator: Send + Sync {
    /// Signal all components to begin shutdown. Idempotent.
    fn signal_shutdown(&self, reason: &str);

    /// Check if shutdown has been signaled
    fn is_shutting_down(&self) -> bool;
}
