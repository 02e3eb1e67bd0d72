//! Hardware adapter — bundles the three collaborators behind the port traits.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) takes a single `hw`
//! argument that satisfies [`ProbePort`], [`TransportPort`] and
//! [`IndicatorPort`] at once. This adapter owns one implementation of each
//! and forwards to it, avoiding three simultaneous mutable borrows at the
//! call site.

use crate::app::ports::{IndicatorPort, ProbePort, TransportDelegate, TransportPort};
use crate::error::TransportError;
use crate::link::{MacAddress, MessageId};

/// Concrete adapter that combines a probe, a mesh transport and an indicator.
pub struct NodeHardware<P, T, I> {
    probe: P,
    transport: T,
    indicator: I,
}

impl<P, T, I> NodeHardware<P, T, I>
where
    P: ProbePort,
    T: TransportPort,
    I: IndicatorPort,
{
    pub fn new(probe: P, transport: T, indicator: I) -> Self {
        Self {
            probe,
            transport,
            indicator,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

// ── ProbePort implementation ──────────────────────────────────

impl<P: ProbePort, T, I> ProbePort for NodeHardware<P, T, I> {
    fn set_resolution(&mut self, bits: u8) {
        self.probe.set_resolution(bits);
    }

    fn begin_conversion(&mut self) {
        self.probe.begin_conversion();
    }

    fn is_conversion_complete(&mut self) -> bool {
        self.probe.is_conversion_complete()
    }

    fn read_celsius(&mut self) -> f32 {
        self.probe.read_celsius()
    }
}

// ── TransportPort implementation ──────────────────────────────

impl<P, T: TransportPort, I> TransportPort for NodeHardware<P, T, I> {
    fn begin(&mut self, network_name: &str) -> Result<(), TransportError> {
        self.transport.begin(network_name)
    }

    fn send_broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.transport.send_broadcast(payload)
    }

    fn send_unicast(&mut self, payload: &[u8], to: MacAddress) -> Result<MessageId, TransportError> {
        self.transport.send_unicast(payload, to)
    }

    fn maintenance_tick(&mut self, delegate: &mut dyn TransportDelegate) {
        self.transport.maintenance_tick(delegate);
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<P, T, I: IndicatorPort> IndicatorPort for NodeHardware<P, T, I> {
    fn set_on(&mut self) {
        self.indicator.set_on();
    }

    fn set_off(&mut self) {
        self.indicator.set_off();
    }
}
