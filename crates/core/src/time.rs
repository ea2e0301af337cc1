use std::time::Duration;

use chrono::{DateTime, Utc};

/// Monotonic timestamp used for ordering and duration math (`last_rebalance_at`,
/// `opened_at`, deadline checks). Never goes backwards within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant(std::time::Instant);

impl Instant {
    pub fn now() -> Self {
        Instant(std::time::Instant::now())
    }

    /// Wrap a raw `std::time::Instant`. Exists for `Clock` implementations
    /// (real or deterministic) that need to construct a value other than
    /// "now"; domain code should use `Clock::now()` instead of this directly.
    pub fn from_std(raw: std::time::Instant) -> Self {
        Instant(raw)
    }

    pub fn duration_since(self, earlier: Instant) -> Duration {
        self.0.duration_since(earlier.0)
    }

    pub fn elapsed(self) -> Duration {
        self.0.elapsed()
    }
}

/// Wall-clock stamp carried alongside `Instant` on audit records so callers
/// persisting executions (§6) have a human-meaningful timestamp even though
/// internal ordering relies on the monotonic `Instant`.
pub type WallClock = DateTime<Utc>;
