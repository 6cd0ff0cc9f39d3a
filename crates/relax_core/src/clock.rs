//! Converts elapsed wall-clock time into whole playback ticks.

use crate::playback::TICKS_PER_SECOND;
use log::debug;
use std::time::Duration;

/// Fixed-rate tick accumulator.
///
/// Elapsed time that does not fill a whole tick period carries over to the
/// next call. A single call never yields more than `max_catch_up` ticks; any
/// backlog beyond that is dropped rather than replayed.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    carry: Duration,
    max_catch_up: u32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(30)
    }
}

impl TickClock {
    pub fn new(max_catch_up: u32) -> Self {
        Self {
            // Truncated to whole nanoseconds so a full second holds all 60 ticks.
            period: Duration::from_nanos((1e9 / TICKS_PER_SECOND) as u64),
            carry: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks due after `elapsed` more wall-clock time.
    pub fn due(&mut self, elapsed: Duration) -> u32 {
        self.carry = self.carry.saturating_add(elapsed);
        let whole = self.carry.as_nanos() / self.period.as_nanos();
        if whole > u128::from(self.max_catch_up) {
            debug!(
                "tick clock dropping {} overdue ticks",
                whole - u128::from(self.max_catch_up)
            );
            self.carry = Duration::ZERO;
            return self.max_catch_up;
        }
        // `whole` fits in u32 here since it is bounded by `max_catch_up`.
        let whole = whole as u32;
        self.carry -= self.period * whole;
        whole
    }

    /// Forget any partial tick, e.g. after a pause.
    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}
