//! Mock collaborators for integration tests.
//!
//! `MockNode` implements every port and records every call, so tests can
//! assert on probe requests, radio traffic and indicator activity without
//! real hardware. Inbound radio traffic is queued by the test and handed to
//! the delegate on the next maintenance tick, exactly like a real transport.

use std::collections::VecDeque;

use ecs_node::app::events::AppEvent;
use ecs_node::app::ports::{
    EventSink, IndicatorPort, ProbePort, TransportDelegate, TransportPort,
};
use ecs_node::config::NodeConfig;
use ecs_node::error::TransportError;
use ecs_node::link::{MacAddress, MessageId};
use ecs_node::scheduler::Scheduler;

pub const GATEWAY: MacAddress = MacAddress::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

#[derive(Debug, Clone)]
pub enum Inbound {
    Unicast { payload: Vec<u8>, sender: MacAddress },
    Confirm { target: MacAddress, id: MessageId, success: bool },
}

// ── MockNode ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockNode {
    // Probe
    pub resolution: Option<u8>,
    pub begins: u32,
    pub converting: bool,
    pub complete: bool,
    pub celsius: f32,
    pub reads: u32,

    // Transport
    pub network: Option<String>,
    pub fail_begin: bool,
    pub fail_unicast: bool,
    pub broadcasts: Vec<Vec<u8>>,
    pub unicasts: Vec<(Vec<u8>, MacAddress)>,
    pub unicast_attempts: u32,
    pub inbound: VecDeque<Inbound>,
    pub ticks: u32,

    // Indicator
    pub led_on: bool,
    pub led_on_calls: u32,
}

#[allow(dead_code)]
impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_reply(&mut self, sender: MacAddress) {
        self.inbound.push_back(Inbound::Unicast {
            payload: b"GW".to_vec(),
            sender,
        });
    }

    pub fn queue_confirm(&mut self, target: MacAddress, id: MessageId, success: bool) {
        self.inbound
            .push_back(Inbound::Confirm { target, id, success });
    }

    /// Make the running conversion report `celsius` on its next poll.
    pub fn finish_conversion(&mut self, celsius: f32) {
        assert!(self.converting, "no conversion running");
        self.celsius = celsius;
        self.complete = true;
    }
}

impl ProbePort for MockNode {
    fn set_resolution(&mut self, bits: u8) {
        self.resolution = Some(bits);
    }

    fn begin_conversion(&mut self) {
        assert!(!self.converting, "conversion requested while one is running");
        self.begins += 1;
        self.converting = true;
        self.complete = false;
    }

    fn is_conversion_complete(&mut self) -> bool {
        self.converting && self.complete
    }

    fn read_celsius(&mut self) -> f32 {
        self.reads += 1;
        self.converting = false;
        self.complete = false;
        self.celsius
    }
}

impl TransportPort for MockNode {
    fn begin(&mut self, network_name: &str) -> Result<(), TransportError> {
        if self.fail_begin {
            return Err(TransportError::InitFailed);
        }
        self.network = Some(network_name.to_string());
        Ok(())
    }

    fn send_broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.broadcasts.push(payload.to_vec());
        Ok(())
    }

    fn send_unicast(&mut self, payload: &[u8], to: MacAddress) -> Result<MessageId, TransportError> {
        self.unicast_attempts += 1;
        if self.fail_unicast {
            return Err(TransportError::SendFailed);
        }
        self.unicasts.push((payload.to_vec(), to));
        Ok(self.unicasts.len() as MessageId)
    }

    fn maintenance_tick(&mut self, delegate: &mut dyn TransportDelegate) {
        self.ticks += 1;
        while let Some(event) = self.inbound.pop_front() {
            match event {
                Inbound::Unicast { payload, sender } => {
                    delegate.on_unicast_received(&payload, sender);
                }
                Inbound::Confirm {
                    target,
                    id,
                    success,
                } => delegate.on_send_confirmed(target, id, success),
            }
        }
    }
}

impl IndicatorPort for MockNode {
    fn set_on(&mut self) {
        self.led_on = true;
        self.led_on_calls += 1;
    }

    fn set_off(&mut self) {
        self.led_on = false;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// A started node with default config.
pub fn started_node() -> (Scheduler, MockNode, RecordingSink) {
    started_node_with(NodeConfig::default())
}

pub fn started_node_with(config: NodeConfig) -> (Scheduler, MockNode, RecordingSink) {
    let mut node = Scheduler::new(config).expect("valid config");
    let mut hw = MockNode::new();
    let mut sink = RecordingSink::new();
    node.start(&mut hw, &mut sink).expect("start");
    (node, hw, sink)
}

/// A node that resolved [`GATEWAY`] at t=0 and has a conversion running.
#[allow(dead_code)]
pub fn resolved_node() -> (Scheduler, MockNode, RecordingSink) {
    let (mut node, mut hw, mut sink) = started_node();
    hw.queue_reply(GATEWAY);
    node.poll(0, &mut hw, &mut sink);
    assert_eq!(node.gateway(), Some(GATEWAY));
    (node, hw, sink)
}
