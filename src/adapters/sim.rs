//! Simulated collaborators for host runs.
//!
//! - [`SimProbe`] — a DS18B20-style probe whose conversion time follows
//!   the configured resolution and whose value drifts slowly.
//! - [`SimMesh`] — a mesh link with one gateway that answers the first
//!   discovery probe after a configurable delay and confirms every unicast.
//!
//! Both read wall time from a shared [`MonotonicClock`] so they stay in step
//! with the scheduler's `now`.

use std::collections::VecDeque;

use log::{debug, info};

use crate::adapters::time::MonotonicClock;
use crate::app::ports::{ProbePort, TransportDelegate, TransportPort};
use crate::error::TransportError;
use crate::link::record;
use crate::link::{MacAddress, MessageId};

/// Largest frame the simulated link accepts (ESP-NOW sized).
pub const MAX_PAYLOAD: usize = 250;

/// Conversion time for a DS18B20 at the given resolution.
pub fn conversion_time_ms(bits: u8) -> u32 {
    750 >> (12 - bits.clamp(9, 12))
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

pub struct SimProbe {
    clock: MonotonicClock,
    resolution_bits: u8,
    base_celsius: f32,
    started_ms: Option<u32>,
    conversions: u32,
    stuck: bool,
}

impl SimProbe {
    pub fn new(clock: MonotonicClock, base_celsius: f32) -> Self {
        Self {
            clock,
            resolution_bits: 12,
            base_celsius,
            started_ms: None,
            conversions: 0,
            stuck: false,
        }
    }

    /// A stuck probe accepts conversion requests but never completes them.
    pub fn set_stuck(&mut self, stuck: bool) {
        self.stuck = stuck;
    }

    pub fn conversions(&self) -> u32 {
        self.conversions
    }
}

impl ProbePort for SimProbe {
    fn set_resolution(&mut self, bits: u8) {
        self.resolution_bits = bits.clamp(9, 12);
        debug!(
            "SimProbe: {}-bit, {} ms/conversion",
            self.resolution_bits,
            conversion_time_ms(self.resolution_bits)
        );
    }

    fn begin_conversion(&mut self) {
        self.started_ms = Some(self.clock.now_ms());
        self.conversions += 1;
    }

    fn is_conversion_complete(&mut self) -> bool {
        if self.stuck {
            return false;
        }
        self.started_ms.is_some_and(|start| {
            self.clock.now_ms().wrapping_sub(start) >= conversion_time_ms(self.resolution_bits)
        })
    }

    fn read_celsius(&mut self) -> f32 {
        // Slow ±1.5 °C swing, quantised to the probe's LSB.
        let phase = self.conversions as f32 * 0.3;
        let raw = self.base_celsius + 1.5 * phase.sin();
        let lsb = 0.5 / f32::from(1u8 << (self.resolution_bits - 9));
        (raw / lsb).round() * lsb
    }
}

// ---------------------------------------------------------------------------
// Mesh transport
// ---------------------------------------------------------------------------

enum Pending {
    Reply,
    Confirm { id: MessageId },
}

pub struct SimMesh {
    clock: MonotonicClock,
    gateway: MacAddress,
    reply_after_ms: u32,
    joined: bool,
    first_probe_ms: Option<u32>,
    replied: bool,
    pending: VecDeque<Pending>,
    next_id: MessageId,
    broadcasts: u32,
    received: u32,
}

impl SimMesh {
    pub fn new(clock: MonotonicClock, gateway: MacAddress, reply_after_ms: u32) -> Self {
        Self {
            clock,
            gateway,
            reply_after_ms,
            joined: false,
            first_probe_ms: None,
            replied: false,
            pending: VecDeque::new(),
            next_id: 1,
            broadcasts: 0,
            received: 0,
        }
    }

    pub fn broadcasts(&self) -> u32 {
        self.broadcasts
    }

    /// Records the simulated gateway decoded successfully.
    pub fn received(&self) -> u32 {
        self.received
    }
}

impl TransportPort for SimMesh {
    fn begin(&mut self, network_name: &str) -> Result<(), TransportError> {
        if network_name.is_empty() {
            return Err(TransportError::InitFailed);
        }
        info!("SimMesh: joined '{}', gateway at {}", network_name, self.gateway);
        self.joined = true;
        Ok(())
    }

    fn send_broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if !self.joined {
            return Err(TransportError::InitFailed);
        }
        if payload.len() > MAX_PAYLOAD {
            return Err(TransportError::PayloadTooLarge);
        }
        self.broadcasts += 1;
        if self.first_probe_ms.is_none() {
            self.first_probe_ms = Some(self.clock.now_ms());
        }
        Ok(())
    }

    fn send_unicast(&mut self, payload: &[u8], to: MacAddress) -> Result<MessageId, TransportError> {
        if !self.joined {
            return Err(TransportError::InitFailed);
        }
        if payload.len() > MAX_PAYLOAD {
            return Err(TransportError::PayloadTooLarge);
        }
        if to != self.gateway {
            return Err(TransportError::NoPeer);
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        match record::decode(payload) {
            Ok(r) => {
                self.received += 1;
                info!("SimMesh: gateway rx {} = {:.2}\u{00b0}C", r.node, r.celsius);
            }
            Err(e) => debug!("SimMesh: gateway could not decode msg {}: {}", id, e),
        }
        self.pending.push_back(Pending::Confirm { id });
        Ok(id)
    }

    fn maintenance_tick(&mut self, delegate: &mut dyn TransportDelegate) {
        if !self.replied {
            if let Some(first) = self.first_probe_ms {
                if self.clock.now_ms().wrapping_sub(first) >= self.reply_after_ms {
                    self.replied = true;
                    self.pending.push_back(Pending::Reply);
                }
            }
        }

        while let Some(p) = self.pending.pop_front() {
            match p {
                Pending::Reply => delegate.on_unicast_received(b"ECS_GW", self.gateway),
                Pending::Confirm { id } => delegate.on_send_confirmed(self.gateway, id, true),
            }
        }
    }
}
