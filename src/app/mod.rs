//! Application boundary — ports and events, zero I/O.
//!
//! All interaction with the probe, the radio and the indicator happens
//! through the **port traits** defined in [`ports`], keeping the node
//! core fully testable without real peripherals.

pub mod events;
pub mod ports;
