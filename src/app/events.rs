//! Outbound application events.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them (serial log, test recorder).

use crate::error::{Error, TransportError};
use crate::link::{MacAddress, MessageId};
use crate::sensors::Reading;

/// Structured events emitted by the node core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The node joined the mesh and entered discovery.
    Started { network: heapless::String<32> },

    /// A discovery broadcast went out (1-based attempt counter).
    ProbeSent { attempt: u32 },

    /// A discovery broadcast could not be queued; retried next interval.
    ProbeFailed { attempt: u32, error: TransportError },

    /// The gateway address is known; steady state begins.
    GatewayResolved(MacAddress),

    /// A unicast arrived after resolution and was not acted on.
    ReplyIgnored { sender: MacAddress, len: usize },

    /// A temperature conversion was requested from the probe.
    ConversionRequested,

    /// A conversion completed and a reading is pending send.
    ReadingReady(Reading),

    /// The pending reading was handed to the transport.
    ReadingSent {
        gateway: MacAddress,
        message_id: MessageId,
        seq: u16,
    },

    /// The pending reading could not be sent. Never retried.
    SendFailed { gateway: MacAddress, error: Error },

    /// Link-layer confirmation for an earlier unicast.
    SendConfirmed {
        target: MacAddress,
        message_id: MessageId,
        success: bool,
    },

    /// Inbound notifications were dropped because the inbox was full.
    InboxOverflow { dropped: usize },
}
