//! Cooperative node scheduler.
//!
//! Owns every component and advances each one by a single non-blocking
//! step per call to [`Scheduler::poll`]. The caller's loop is nothing more
//! than `poll(now)` in a tight cycle.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Discovery (boot gate)           Running (steady state)      │
//! │                                                              │
//! │  GatewayLocator.step             TemperatureSampler.step     │
//! │  transport.maintenance_tick      MessageDispatcher.send      │
//! │  BlinkScheduler.step               (when a reading is ready) │
//! │        │                         transport.maintenance_tick  │
//! │        │ first unicast reply     BlinkScheduler.step         │
//! │        └──────────▶ eager sample ──▶                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discovery blocks sampling by construction: the sampler is not stepped
//! until the gateway is known. Because the sampler's output is consumed in
//! the same `poll` that produced it, at most one reading is ever pending.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, IndicatorPort, ProbePort, TransportPort};
use crate::config::NodeConfig;
use crate::drivers::blink::BlinkScheduler;
use crate::error::Result;
use crate::link::discovery::{GatewayLocator, ProbeOutcome};
use crate::link::dispatcher::{DispatchStats, MessageDispatcher};
use crate::link::{Inbox, LinkEvent, MacAddress};
use crate::sensors::{NodeId, Reading};
use crate::sensors::temperature::{SampleStep, TemperatureSampler};

/// Top-level node phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePhase {
    /// Looking for the gateway; sampling is held off.
    Discovery,
    /// Gateway known; sampling and dispatch run.
    Running,
}

/// Point-in-time diagnostic snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStatus {
    pub phase: NodePhase,
    pub gateway: Option<MacAddress>,
    pub probes_sent: u32,
    pub last_sample_ms: Option<u32>,
    pub dispatch: DispatchStats,
}

pub struct Scheduler {
    config: NodeConfig,
    phase: NodePhase,
    locator: GatewayLocator,
    sampler: TemperatureSampler,
    dispatcher: MessageDispatcher,
    blink: BlinkScheduler,
    inbox: Inbox,
}

impl Scheduler {
    /// Build the node from a validated configuration.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate()?;
        let node = NodeId::from_name(&config.node_name)?;
        let locator = GatewayLocator::new(
            config.probe_interval_ms,
            config.searching_blink,
            config.resolved_blink,
        );
        let sampler =
            TemperatureSampler::new(node, config.sampling_interval_ms, config.sampling_blink);

        Ok(Self {
            config,
            phase: NodePhase::Discovery,
            locator,
            sampler,
            dispatcher: MessageDispatcher::new(),
            blink: BlinkScheduler::new(),
            inbox: Inbox::new(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the probe and join the mesh. Call once before `poll`.
    pub fn start<H>(&mut self, hw: &mut H, sink: &mut impl EventSink) -> Result<()>
    where
        H: ProbePort + TransportPort + IndicatorPort,
    {
        hw.set_resolution(self.config.probe_resolution_bits);
        hw.begin(&self.config.network_name)?;
        self.blink.cancel(hw);
        info!(
            "Node {} joined '{}', entering discovery",
            self.config.node_name, self.config.network_name
        );
        sink.emit(&AppEvent::Started {
            network: self.config.network_name.clone(),
        });
        Ok(())
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration. Never blocks.
    pub fn poll<H>(&mut self, now_ms: u32, hw: &mut H, sink: &mut impl EventSink)
    where
        H: ProbePort + TransportPort + IndicatorPort,
    {
        match self.phase {
            NodePhase::Discovery => self.poll_discovery(now_ms, hw, sink),
            NodePhase::Running => self.poll_running(now_ms, hw, sink),
        }
        self.blink.step(now_ms, hw);
    }

    fn poll_discovery<H>(&mut self, now_ms: u32, hw: &mut H, sink: &mut impl EventSink)
    where
        H: ProbePort + TransportPort + IndicatorPort,
    {
        match self.locator.step(now_ms, hw, &mut self.blink) {
            ProbeOutcome::Sent(attempt) => sink.emit(&AppEvent::ProbeSent { attempt }),
            ProbeOutcome::Failed(attempt, error) => {
                sink.emit(&AppEvent::ProbeFailed { attempt, error });
            }
            ProbeOutcome::Waiting => {}
        }

        self.service_transport(hw, sink);

        if let Some(gateway) = self.locator.gateway() {
            self.phase = NodePhase::Running;
            sink.emit(&AppEvent::GatewayResolved(gateway));
            // First reading shouldn't wait a full sampling interval.
            if self.sampler.request_now(hw) {
                sink.emit(&AppEvent::ConversionRequested);
            }
        }
    }

    fn poll_running<H>(&mut self, now_ms: u32, hw: &mut H, sink: &mut impl EventSink)
    where
        H: ProbePort + TransportPort + IndicatorPort,
    {
        match self.sampler.step(now_ms, hw, &mut self.blink) {
            SampleStep::Requested => sink.emit(&AppEvent::ConversionRequested),
            SampleStep::Completed => {
                if let Some(reading) = self.sampler.take_ready() {
                    sink.emit(&AppEvent::ReadingReady(reading));
                    self.dispatch(&reading, hw, sink);
                }
            }
            SampleStep::Idle => {}
        }

        self.service_transport(hw, sink);
    }

    fn dispatch<H>(&mut self, reading: &Reading, hw: &mut H, sink: &mut impl EventSink)
    where
        H: TransportPort,
    {
        let Some(gateway) = self.locator.gateway() else {
            // Running implies resolved; nothing sensible to do otherwise.
            warn!("Dispatch skipped: gateway unresolved");
            return;
        };
        match self.dispatcher.send(reading, gateway, hw) {
            Ok(message_id) => sink.emit(&AppEvent::ReadingSent {
                gateway,
                message_id,
                seq: reading.seq,
            }),
            Err(error) => sink.emit(&AppEvent::SendFailed { gateway, error }),
        }
    }

    /// Drive the transport housekeeping tick and route what it delivered.
    fn service_transport<H>(&mut self, hw: &mut H, sink: &mut impl EventSink)
    where
        H: TransportPort,
    {
        hw.maintenance_tick(&mut self.inbox);
        let (events, dropped) = self.inbox.drain();
        if dropped > 0 {
            sink.emit(&AppEvent::InboxOverflow { dropped });
        }

        for event in events {
            match event {
                LinkEvent::Unicast { sender, len } => {
                    if !self.locator.on_unicast(sender, &mut self.blink) {
                        debug!("Ignoring {}-byte unicast from {}", len, sender);
                        sink.emit(&AppEvent::ReplyIgnored { sender, len });
                    }
                }
                LinkEvent::Confirmed {
                    target,
                    message_id,
                    success,
                } => {
                    self.dispatcher.on_send_confirmed(target, message_id, success);
                    sink.emit(&AppEvent::SendConfirmed {
                        target,
                        message_id,
                        success,
                    });
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> NodePhase {
        self.phase
    }

    pub fn gateway(&self) -> Option<MacAddress> {
        self.locator.gateway()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// True while a completed reading has not been dispatched yet.
    pub fn has_pending_reading(&self) -> bool {
        self.sampler.is_ready()
    }

    pub fn status(&self) -> NodeStatus {
        NodeStatus {
            phase: self.phase,
            gateway: self.locator.gateway(),
            probes_sent: self.locator.probes_sent(),
            last_sample_ms: self.sampler.last_sample_ms(),
            dispatch: self.dispatcher.stats(),
        }
    }
}
