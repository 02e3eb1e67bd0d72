//! Non-blocking blink scheduler for the single status indicator.
//!
//! Plays one [`BlinkPattern`] at a time. The main loop calls
//! [`BlinkScheduler::step`] every iteration with the current time; the
//! scheduler toggles the indicator through [`IndicatorPort`] when a phase
//! has elapsed and returns immediately otherwise.
//!
//! ## Semantics
//!
//! - **Last request wins.** [`request`](BlinkScheduler::request) replaces
//!   whatever is playing; the old pattern's remaining cycles are dropped.
//! - **Finite patterns** go inactive after `N` complete on/off cycles. A
//!   cycle completes at the end of its off phase.
//! - **Indefinite patterns** cycle until [`cancel`](BlinkScheduler::cancel)
//!   or a new request.
//!
//! ## Well-known patterns
//!
//! | Pattern     | On    | Off   | Repeat  | Meaning             |
//! |-------------|-------|-------|---------|---------------------|
//! | `SEARCHING` | 100ms | 400ms | forever | probing for gateway |
//! | `RESOLVED`  | 50ms  | 50ms  | 3       | gateway found       |
//! | `SAMPLING`  | 20ms  | 0ms   | 1       | conversion started  |

use serde::{Deserialize, Serialize};

use crate::app::ports::IndicatorPort;

/// How many on/off cycles a pattern plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    Times(u16),
    Forever,
}

/// A timed on/off signal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkPattern {
    pub on_ms: u32,
    pub off_ms: u32,
    pub repeat: Repeat,
}

impl BlinkPattern {
    pub const fn finite(on_ms: u32, off_ms: u32, times: u16) -> Self {
        Self {
            on_ms,
            off_ms,
            repeat: Repeat::Times(times),
        }
    }

    pub const fn forever(on_ms: u32, off_ms: u32) -> Self {
        Self {
            on_ms,
            off_ms,
            repeat: Repeat::Forever,
        }
    }
}

pub const SEARCHING: BlinkPattern = BlinkPattern::forever(100, 400);
pub const RESOLVED: BlinkPattern = BlinkPattern::finite(50, 50, 3);
pub const SAMPLING: BlinkPattern = BlinkPattern::finite(20, 0, 1);

#[derive(Debug, Clone, Copy)]
struct ActiveBlink {
    pattern: BlinkPattern,
    /// Start of the current on or off phase; `None` until the first step.
    phase_start_ms: Option<u32>,
    cycles_done: u16,
}

/// Single-slot blink player. Stack-allocated, no heap.
pub struct BlinkScheduler {
    active: Option<ActiveBlink>,
    /// Last level written to the indicator.
    lit: bool,
}

impl Default for BlinkScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkScheduler {
    pub fn new() -> Self {
        Self {
            active: None,
            lit: false,
        }
    }

    /// Replace the current pattern. Takes effect on the next `step`.
    pub fn request(&mut self, pattern: BlinkPattern) {
        self.active = match pattern.repeat {
            Repeat::Times(0) => None,
            _ => Some(ActiveBlink {
                pattern,
                phase_start_ms: None,
                cycles_done: 0,
            }),
        };
    }

    /// Stop immediately and leave the indicator off.
    pub fn cancel<I: IndicatorPort + ?Sized>(&mut self, indicator: &mut I) {
        self.active = None;
        indicator.set_off();
        self.lit = false;
    }

    /// Advance the current pattern. Never blocks.
    pub fn step<I: IndicatorPort + ?Sized>(&mut self, now_ms: u32, indicator: &mut I) {
        let Some(active) = self.active.as_mut() else {
            // A replaced or zero-length request can leave the LED lit.
            if self.lit {
                indicator.set_off();
                self.lit = false;
            }
            return;
        };

        let Some(start) = active.phase_start_ms else {
            indicator.set_on();
            self.lit = true;
            active.phase_start_ms = Some(now_ms);
            return;
        };

        let elapsed = now_ms.wrapping_sub(start);
        if self.lit {
            if elapsed >= active.pattern.on_ms {
                indicator.set_off();
                self.lit = false;
                active.phase_start_ms = Some(now_ms);
            }
        } else if elapsed >= active.pattern.off_ms {
            active.cycles_done = active.cycles_done.saturating_add(1);
            let finished = match active.pattern.repeat {
                Repeat::Times(n) => active.cycles_done >= n,
                Repeat::Forever => false,
            };
            if finished {
                self.active = None;
            } else {
                indicator.set_on();
                self.lit = true;
                active.phase_start_ms = Some(now_ms);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// The pattern currently playing, if any.
    pub fn current(&self) -> Option<BlinkPattern> {
        self.active.map(|a| a.pattern)
    }

    /// Completed cycles of the current pattern.
    pub fn cycles_done(&self) -> u16 {
        self.active.map_or(0, |a| a.cycles_done)
    }
}
