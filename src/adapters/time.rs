//! Monotonic millisecond clock.
//!
//! The core only ever sees a wrapping `u32` millisecond counter, the same
//! shape as a microcontroller's `millis()`. Every component compares
//! timestamps with `wrapping_sub`, so the ~49.7 day rollover is harmless.

use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since construction, truncated to `u32` (wraps).
    pub fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    /// Seconds since construction.
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}
