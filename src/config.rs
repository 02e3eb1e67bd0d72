//! Node configuration parameters
//!
//! All tunable parameters for the ECS telemetry node. Fixed for the life
//! of the node once the [`Scheduler`](crate::scheduler::Scheduler) is built.
//! The bench runner can load them from a JSON file.

use serde::{Deserialize, Serialize};

use crate::drivers::blink::{self, BlinkPattern, Repeat};
use crate::error::{Error, Result};
use crate::sensors::NODE_ID_LEN;

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    // --- Identity ---
    /// Node identifier carried in every record (≤5 ASCII chars)
    pub node_name: heapless::String<8>,
    /// Mesh network to join
    pub network_name: heapless::String<32>,

    // --- Timing ---
    /// Minimum time between completed sample and next request (milliseconds)
    pub sampling_interval_ms: u32,
    /// Discovery broadcast period (milliseconds)
    pub probe_interval_ms: u32,

    // --- Probe ---
    /// Probe conversion resolution (9-12 bits)
    pub probe_resolution_bits: u8,

    // --- Indicator ---
    pub searching_blink: BlinkPattern,
    pub resolved_blink: BlinkPattern,
    pub sampling_blink: BlinkPattern,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut node_name = heapless::String::new();
        let _ = node_name.push_str("ECS_T");
        let mut network_name = heapless::String::new();
        let _ = network_name.push_str("ecs-mesh");

        Self {
            node_name,
            network_name,

            sampling_interval_ms: 15_000,
            probe_interval_ms: 500,

            probe_resolution_bits: 10, // 0.25 °C, ~188 ms conversion

            searching_blink: blink::SEARCHING,
            resolved_blink: blink::RESOLVED,
            sampling_blink: blink::SAMPLING,
        }
    }
}

impl NodeConfig {
    /// Reject values the node cannot run with.
    pub fn validate(&self) -> Result<()> {
        let name = self.node_name.as_str();
        if name.is_empty() {
            return Err(Error::Config("node_name is empty"));
        }
        if name.len() >= NODE_ID_LEN {
            return Err(Error::Config("node_name longer than 5 characters"));
        }
        if !name.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(Error::Config("node_name must be printable ASCII"));
        }
        if self.network_name.is_empty() {
            return Err(Error::Config("network_name is empty"));
        }
        if self.sampling_interval_ms == 0 {
            return Err(Error::Config("sampling_interval_ms must be > 0"));
        }
        if self.probe_interval_ms == 0 {
            return Err(Error::Config("probe_interval_ms must be > 0"));
        }
        if !(9..=12).contains(&self.probe_resolution_bits) {
            return Err(Error::Config("probe_resolution_bits must be 9..=12"));
        }
        for pattern in [self.searching_blink, self.resolved_blink, self.sampling_blink] {
            if pattern.on_ms == 0 {
                return Err(Error::Config("blink on_ms must be > 0"));
            }
            if pattern.repeat == Repeat::Forever && pattern.off_ms == 0 {
                return Err(Error::Config("indefinite blink needs an off phase"));
            }
        }
        Ok(())
    }
}
