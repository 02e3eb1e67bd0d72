//! Mesh link: addressing, gateway discovery, wire records and dispatch.
//!
//! ```text
//!  TransportPort::maintenance_tick ──▶ Inbox ──▶ Scheduler
//!                                                  ├─▶ GatewayLocator (unicast replies)
//!                                                  └─▶ MessageDispatcher (send confirms)
//! ```

pub mod discovery;
pub mod dispatcher;
pub mod record;

use core::fmt;
use core::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::app::ports::TransportDelegate;
use crate::error::Error;

/// Link-layer message identifier assigned by the transport.
pub type MessageId = u32;

/// Maximum inbound notifications buffered per maintenance tick.
pub const INBOX_CAP: usize = 8;

// ---------------------------------------------------------------------------
// MAC address
// ---------------------------------------------------------------------------

/// 6-byte link-layer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub const BROADCAST: Self = Self([0xFF; 6]);

    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    /// Parse `AA:BB:CC:DD:EE:FF` (case-insensitive, `-` also accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for byte in &mut out {
            let part = parts.next().ok_or(Error::Config("MAC address too short"))?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::Config("MAC octet must be two hex digits"));
            }
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| Error::Config("MAC octet is not hex"))?;
        }
        if parts.next().is_some() {
            return Err(Error::Config("MAC address too long"));
        }
        Ok(Self(out))
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// A transport notification captured during one maintenance tick.
///
/// Unicast payload content is never interpreted by the node, so only its
/// length is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    Unicast {
        sender: MacAddress,
        len: usize,
    },
    Confirmed {
        target: MacAddress,
        message_id: MessageId,
        success: bool,
    },
}

/// Bounded buffer that collects notifications from the transport so the
/// scheduler can route them after the tick returns.
#[derive(Default)]
pub struct Inbox {
    events: heapless::Vec<LinkEvent, INBOX_CAP>,
    dropped: usize,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events and the overflow count, leaving the inbox empty.
    pub fn drain(&mut self) -> (heapless::Vec<LinkEvent, INBOX_CAP>, usize) {
        let dropped = core::mem::take(&mut self.dropped);
        (core::mem::take(&mut self.events), dropped)
    }

    fn push(&mut self, event: LinkEvent) {
        if self.events.push(event).is_err() {
            self.dropped += 1;
            warn!("Inbox full, dropping {:?}", event);
        }
    }
}

impl TransportDelegate for Inbox {
    fn on_unicast_received(&mut self, payload: &[u8], sender: MacAddress) {
        self.push(LinkEvent::Unicast {
            sender,
            len: payload.len(),
        });
    }

    fn on_send_confirmed(&mut self, target: MacAddress, message_id: MessageId, success: bool) {
        self.push(LinkEvent::Confirmed {
            target,
            message_id,
            success,
        });
    }
}
