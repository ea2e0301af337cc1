use reserve_core::Instant;

/// Port for time abstraction.
///
/// Allows the reserve manager to use different time sources: real system
/// time in production, a fixed/manual clock for deterministic tests.
pub trait Clock: Send + Sync {
    /// Get the current monotonic time according to this clock.
    fn now(&self) -> Instant;

    /// Clock name/identifier, for logging.
    fn name(&self) -> &str {
        "Clock"
    }
}
