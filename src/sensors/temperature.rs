//! Non-blocking temperature sampler.
//!
//! A DS18B20-class probe needs up to 750 ms per conversion, so the sampler
//! never waits for it: each [`step`](TemperatureSampler::step) either starts
//! a conversion, checks whether the running one finished, or does nothing.
//!
//! ```text
//!            interval elapsed               probe reports done
//!   Idle ─────────────────────▶ Converting ─────────────────────▶ Idle
//!                                                                 (ready = true)
//! ```
//!
//! A probe that never completes leaves the sampler in `Converting` forever.
//! The rest of the node keeps running; this channel just goes silent.

use log::debug;

use crate::app::ports::ProbePort;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::sensors::{NodeId, Reading};

/// Outcome of one [`TemperatureSampler::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStep {
    /// Nothing to do this iteration.
    Idle,
    /// A new conversion was requested.
    Requested,
    /// A conversion finished and a reading is pending send.
    Completed,
}

pub struct TemperatureSampler {
    interval_ms: u32,
    converting: bool,
    /// Time of the last completed conversion; `None` until the first one.
    last_sample_ms: Option<u32>,
    reading: Reading,
    ready: bool,
    next_seq: u16,
    indicator: BlinkPattern,
}

impl TemperatureSampler {
    pub fn new(node: NodeId, interval_ms: u32, indicator: BlinkPattern) -> Self {
        Self {
            interval_ms,
            converting: false,
            last_sample_ms: None,
            reading: Reading::new(node),
            ready: false,
            next_seq: 0,
            indicator,
        }
    }

    /// Advance the sampler. Never blocks.
    pub fn step<P: ProbePort + ?Sized>(
        &mut self,
        now_ms: u32,
        probe: &mut P,
        blink: &mut BlinkScheduler,
    ) -> SampleStep {
        if self.converting {
            if !probe.is_conversion_complete() {
                return SampleStep::Idle;
            }
            self.reading.celsius = probe.read_celsius();
            self.reading.seq = self.next_seq;
            self.next_seq = self.next_seq.wrapping_add(1);
            self.ready = true;
            self.converting = false;
            self.last_sample_ms = Some(now_ms);
            debug!(
                "Sampler: conversion done, {:.2}\u{00b0}C (seq {})",
                self.reading.celsius, self.reading.seq
            );
            return SampleStep::Completed;
        }

        if self.is_due(now_ms) {
            self.begin(probe);
            blink.request(self.indicator);
            return SampleStep::Requested;
        }
        SampleStep::Idle
    }

    /// Request a conversion now, ignoring the interval. Used once after
    /// gateway discovery so the first reading isn't a full interval late.
    /// Leaves the indicator alone so the "resolved" signal plays out.
    /// Returns `false` if a conversion is already running.
    pub fn request_now<P: ProbePort + ?Sized>(&mut self, probe: &mut P) -> bool {
        if self.converting {
            return false;
        }
        self.begin(probe);
        true
    }

    /// Take the pending reading, clearing the ready flag.
    pub fn take_ready(&mut self) -> Option<Reading> {
        if self.ready {
            self.ready = false;
            Some(self.reading)
        } else {
            None
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_converting(&self) -> bool {
        self.converting
    }

    pub fn last_sample_ms(&self) -> Option<u32> {
        self.last_sample_ms
    }

    fn is_due(&self, now_ms: u32) -> bool {
        self.last_sample_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= self.interval_ms)
    }

    fn begin<P: ProbePort + ?Sized>(&mut self, probe: &mut P) {
        probe.begin_conversion();
        self.converting = true;
        debug!("Sampler: conversion requested");
    }
}
