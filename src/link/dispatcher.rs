//! Reading dispatch to the resolved gateway.
//!
//! Fire-and-forget: a reading is encoded into one fixed-size record and
//! unicast once. Link-layer confirmations arrive later through the
//! transport's maintenance tick and only feed the counters and the log;
//! a failed send is never retried.

use log::{debug, warn};

use crate::app::ports::TransportPort;
use crate::error::{Error, Result};
use crate::link::record;
use crate::link::{MacAddress, MessageId};
use crate::sensors::Reading;

/// Running dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Records accepted by the transport.
    pub sent: u32,
    /// Records the transport refused (encode or queue failure).
    pub send_errors: u32,
    /// Link-layer confirmations reporting success.
    pub confirmed: u32,
    /// Link-layer confirmations reporting failure.
    pub failed: u32,
}

#[derive(Default)]
pub struct MessageDispatcher {
    stats: DispatchStats,
}

impl MessageDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `reading` and unicast it to `gateway`.
    pub fn send<T: TransportPort + ?Sized>(
        &mut self,
        reading: &Reading,
        gateway: MacAddress,
        transport: &mut T,
    ) -> Result<MessageId> {
        let sent = record::encode(reading)
            .and_then(|bytes| transport.send_unicast(&bytes, gateway).map_err(Error::from));
        match sent {
            Ok(id) => {
                self.stats.sent += 1;
                debug!(
                    "Dispatch: {} {:.2}\u{00b0}C -> {} (msg {})",
                    reading.node, reading.celsius, gateway, id
                );
                Ok(id)
            }
            Err(e) => {
                self.stats.send_errors += 1;
                warn!("Dispatch: send to {} failed: {}", gateway, e);
                Err(e)
            }
        }
    }

    /// Record a link-layer confirmation. Diagnostic only.
    pub fn on_send_confirmed(&mut self, target: MacAddress, message_id: MessageId, success: bool) {
        if success {
            self.stats.confirmed += 1;
            debug!("Dispatch: msg {} to {} confirmed", message_id, target);
        } else {
            self.stats.failed += 1;
            warn!("Dispatch: msg {} to {} not delivered", message_id, target);
        }
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }
}
