//! Port traits — the hexagonal boundary between the node core and its
//! collaborators.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Scheduler (core)
//! ```
//!
//! The probe driver, the mesh transport and the status indicator are
//! external collaborators. The [`Scheduler`](crate::scheduler::Scheduler)
//! consumes them via generics, so the core never touches hardware or the
//! radio stack directly and can be driven with synthetic time in tests.
//!
//! Every method here must return promptly: the whole node runs on one
//! cooperative loop and a blocking port starves every other activity.

use crate::error::TransportError;
use crate::link::{MacAddress, MessageId};

// ───────────────────────────────────────────────────────────────
// Probe port (driven adapter: temperature sensor)
// ───────────────────────────────────────────────────────────────

/// Temperature probe with an asynchronous conversion cycle.
pub trait ProbePort {
    /// Conversion resolution in bits (9–12 for a DS18B20-class probe).
    fn set_resolution(&mut self, bits: u8);

    /// Start a conversion. Returns immediately.
    fn begin_conversion(&mut self);

    /// Non-blocking completion check.
    fn is_conversion_complete(&mut self) -> bool;

    /// Result of the last completed conversion, in °C.
    fn read_celsius(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: mesh link layer)
// ───────────────────────────────────────────────────────────────

/// Mesh link layer: broadcast/unicast send plus periodic housekeeping.
///
/// Inbound notifications are not delivered from interrupt or radio-task
/// context. The transport buffers them and replays them to the
/// [`TransportDelegate`] from inside [`maintenance_tick`], which keeps
/// event ordering deterministic on the single loop.
///
/// [`maintenance_tick`]: TransportPort::maintenance_tick
pub trait TransportPort {
    /// Join the named mesh.
    fn begin(&mut self, network_name: &str) -> Result<(), TransportError>;

    /// Send `payload` to every reachable peer.
    fn send_broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError>;

    /// Queue `payload` for `to`. The returned id is echoed back in the
    /// matching send confirmation.
    fn send_unicast(&mut self, payload: &[u8], to: MacAddress)
    -> Result<MessageId, TransportError>;

    /// Service the radio and deliver buffered notifications.
    /// Must be called every loop iteration.
    fn maintenance_tick(&mut self, delegate: &mut dyn TransportDelegate);
}

/// Receives transport notifications during [`TransportPort::maintenance_tick`].
pub trait TransportDelegate {
    /// A unicast frame addressed to this node arrived.
    fn on_unicast_received(&mut self, payload: &[u8], sender: MacAddress);

    /// The link layer finished a unicast send.
    fn on_send_confirmed(&mut self, target: MacAddress, message_id: MessageId, success: bool);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: status LED)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    fn set_on(&mut self);
    fn set_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging / diagnostics)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, test
/// recorder, etc.). Emitting never affects control flow.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
