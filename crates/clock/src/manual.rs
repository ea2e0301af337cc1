use std::time::Duration;

use parking_lot::Mutex;
use reserve_core::Instant;
use reserve_ports::Clock;

/// Deterministic clock for tests. Time only moves when [`ManualClock::advance`]
/// is called, never on its own — the opposite of [`crate::SystemClock`].
///
/// `std::time::Instant` carries no public constructor other than `now()`, so
/// this clock captures a base instant at creation and reports `base + offset`,
/// with `offset` advanced explicitly by the test.
pub struct ManualClock {
    base: std::time::Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: std::time::Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Advance the clock by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.lock();
        *offset += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock();
        Instant::from_std(self.base + offset)
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
