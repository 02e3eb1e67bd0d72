//! Gateway discovery by broadcast probing.
//!
//! ```text
//!   Unknown ──first step──▶ Probing ──first unicast reply──▶ Resolved
//!                             │  ▲                          (terminal)
//!                             └──┘ broadcast every probe interval
//! ```
//!
//! The first unicast received while unresolved is taken as the gateway's
//! answer and its sender becomes the gateway address for the rest of the
//! node's life. Reply content is not inspected, there is no give-up
//! timeout, and a gateway that later disappears is never re-discovered.

use log::{debug, info, warn};

use crate::app::ports::TransportPort;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::error::TransportError;
use crate::link::MacAddress;

/// Presence probe broadcast while searching.
pub const DISCOVERY_PAYLOAD: &[u8] = b"ECS_DISCOVER";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
    Unknown,
    Probing,
    Resolved,
}

/// Outcome of one [`GatewayLocator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Not due, or already resolved.
    Waiting,
    /// A probe was broadcast (1-based attempt).
    Sent(u32),
    /// The transport refused the broadcast; retried next interval.
    Failed(u32, TransportError),
}

pub struct GatewayLocator {
    phase: DiscoveryPhase,
    gateway: Option<MacAddress>,
    last_probe_ms: Option<u32>,
    probe_interval_ms: u32,
    probes_sent: u32,
    searching: BlinkPattern,
    resolved: BlinkPattern,
}

impl GatewayLocator {
    pub fn new(probe_interval_ms: u32, searching: BlinkPattern, resolved: BlinkPattern) -> Self {
        Self {
            phase: DiscoveryPhase::Unknown,
            gateway: None,
            last_probe_ms: None,
            probe_interval_ms,
            probes_sent: 0,
            searching,
            resolved,
        }
    }

    /// Advance discovery. Never blocks.
    pub fn step<T: TransportPort + ?Sized>(
        &mut self,
        now_ms: u32,
        transport: &mut T,
        blink: &mut BlinkScheduler,
    ) -> ProbeOutcome {
        match self.phase {
            DiscoveryPhase::Resolved => return ProbeOutcome::Waiting,
            DiscoveryPhase::Unknown => {
                info!("Discovery: searching for gateway");
                blink.request(self.searching);
                self.phase = DiscoveryPhase::Probing;
            }
            DiscoveryPhase::Probing => {}
        }

        let due = self
            .last_probe_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= self.probe_interval_ms);
        if !due {
            return ProbeOutcome::Waiting;
        }

        self.last_probe_ms = Some(now_ms);
        self.probes_sent += 1;
        match transport.send_broadcast(DISCOVERY_PAYLOAD) {
            Ok(()) => {
                debug!("Discovery: probe #{} sent", self.probes_sent);
                ProbeOutcome::Sent(self.probes_sent)
            }
            Err(e) => {
                warn!("Discovery: probe #{} failed: {}", self.probes_sent, e);
                ProbeOutcome::Failed(self.probes_sent, e)
            }
        }
    }

    /// Feed a unicast reply. Returns `true` if it resolved the gateway.
    pub fn on_unicast(&mut self, sender: MacAddress, blink: &mut BlinkScheduler) -> bool {
        if self.phase == DiscoveryPhase::Resolved {
            return false;
        }
        self.gateway = Some(sender);
        self.phase = DiscoveryPhase::Resolved;
        blink.request(self.resolved);
        info!(
            "Discovery: gateway {} resolved after {} probe(s)",
            sender, self.probes_sent
        );
        true
    }

    pub fn phase(&self) -> DiscoveryPhase {
        self.phase
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == DiscoveryPhase::Resolved
    }

    pub fn gateway(&self) -> Option<MacAddress> {
        self.gateway
    }

    /// Probes attempted so far, failed ones included.
    pub fn probes_sent(&self) -> u32 {
        self.probes_sent
    }
}
