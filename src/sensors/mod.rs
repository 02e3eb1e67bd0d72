//! Sensor subsystem — the [`Reading`] produced each sample cycle and the
//! non-blocking [`TemperatureSampler`](temperature::TemperatureSampler).

pub mod temperature;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Width of the node identifier field, terminator included.
pub const NODE_ID_LEN: usize = 6;

/// Fixed-width, NUL-padded ASCII node identifier (e.g. `"ECS_T\0"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeId([u8; NODE_ID_LEN]);

impl NodeId {
    /// Build from a short ASCII name. At least one trailing NUL is kept so
    /// the gateway can treat the field as a C string.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::Config("node name is empty"));
        }
        if name.len() >= NODE_ID_LEN {
            return Err(Error::Config("node name longer than 5 characters"));
        }
        if !name.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(Error::Config("node name must be printable ASCII"));
        }
        let mut raw = [0u8; NODE_ID_LEN];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self(raw))
    }

    pub const fn from_raw(raw: [u8; NODE_ID_LEN]) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> [u8; NODE_ID_LEN] {
        self.0
    }

    /// The name up to the first NUL. Non-UTF-8 content yields `"?"`.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(NODE_ID_LEN);
        core::str::from_utf8(&self.0[..end]).unwrap_or("?")
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sampled temperature destined for a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub node: NodeId,
    pub celsius: f32,
    /// Debug sequence counter; only on the wire with `seq-counter`.
    pub seq: u16,
}

impl Reading {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            celsius: 0.0,
            seq: 0,
        }
    }
}
