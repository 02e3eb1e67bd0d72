//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured node events to the `log`
//! facade (serial console on target, `tracing-subscriber` on the bench).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { network } => {
                info!("START | network={}", network);
            }
            AppEvent::ProbeSent { attempt } => {
                debug!("PROBE | #{} broadcast", attempt);
            }
            AppEvent::ProbeFailed { attempt, error } => {
                warn!("PROBE | #{} failed: {}", attempt, error);
            }
            AppEvent::GatewayResolved(gw) => {
                info!("GATEWAY | resolved {}", gw);
            }
            AppEvent::ReplyIgnored { sender, len } => {
                debug!("RX | ignored {}B from {}", len, sender);
            }
            AppEvent::ConversionRequested => {
                debug!("SAMPLE | conversion requested");
            }
            AppEvent::ReadingReady(r) => {
                info!(
                    "TELEM | node={} | T={:.2}\u{00b0}C | seq={}",
                    r.node, r.celsius, r.seq
                );
            }
            AppEvent::ReadingSent {
                gateway,
                message_id,
                seq,
            } => {
                debug!("TX | seq={} -> {} (msg {})", seq, gateway, message_id);
            }
            AppEvent::SendFailed { gateway, error } => {
                warn!("TX | to {} failed: {}", gateway, error);
            }
            AppEvent::SendConfirmed {
                target,
                message_id,
                success,
            } => {
                if *success {
                    debug!("ACK | msg {} from {}", message_id, target);
                } else {
                    warn!("NACK | msg {} to {}", message_id, target);
                }
            }
            AppEvent::InboxOverflow { dropped } => {
                warn!("RX | inbox overflow, {} event(s) dropped", dropped);
            }
        }
    }
}
