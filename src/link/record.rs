//! Fixed-size wire record for one [`Reading`].
//!
//! Wire format (positional, little-endian, no version or checksum):
//! ```text
//! ┌──────────────────┬──────────────┬─────────────────────┐
//! │ Node ID (6B)     │ Temp (4B)    │ Seq (2B)            │
//! │ ASCII, NUL-pad   │ f32 LE, °C   │ u16 LE, seq-counter │
//! └──────────────────┴──────────────┴─────────────────────┘
//! ```
//!
//! The sequence field only exists when the `seq-counter` feature is on;
//! sender and gateway must be built with the same setting. Integrity is
//! left to the link layer.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::sensors::{NODE_ID_LEN, NodeId, Reading};

#[cfg(feature = "seq-counter")]
const SEQ_LEN: usize = 2;
#[cfg(not(feature = "seq-counter"))]
const SEQ_LEN: usize = 0;

/// Exact size of one encoded record.
pub const RECORD_LEN: usize = NODE_ID_LEN + 4 + SEQ_LEN;

/// Serde view of the record. postcard writes fixed-size arrays and `f32`
/// verbatim; the counter is forced to fixed-width instead of varint.
#[derive(Serialize, Deserialize)]
struct WireRecord {
    node: [u8; NODE_ID_LEN],
    celsius: f32,
    #[cfg(feature = "seq-counter")]
    #[serde(with = "postcard::fixint::le")]
    seq: u16,
}

/// Encode `reading` into exactly [`RECORD_LEN`] bytes.
pub fn encode(reading: &Reading) -> Result<[u8; RECORD_LEN]> {
    let wire = WireRecord {
        node: reading.node.raw(),
        celsius: reading.celsius,
        #[cfg(feature = "seq-counter")]
        seq: reading.seq,
    };
    let mut out = [0u8; RECORD_LEN];
    let used = postcard::to_slice(&wire, &mut out)
        .map_err(|_| CodecError::BufferTooSmall)?
        .len();
    if used != RECORD_LEN {
        return Err(CodecError::LengthMismatch.into());
    }
    Ok(out)
}

/// Decode one record. The input must be exactly [`RECORD_LEN`] bytes.
pub fn decode(bytes: &[u8]) -> Result<Reading> {
    if bytes.len() != RECORD_LEN {
        return Err(CodecError::LengthMismatch.into());
    }
    let wire: WireRecord = postcard::from_bytes(bytes).map_err(|_| CodecError::Malformed)?;
    Ok(Reading {
        node: NodeId::from_raw(wire.node),
        celsius: wire.celsius,
        #[cfg(feature = "seq-counter")]
        seq: wire.seq,
        #[cfg(not(feature = "seq-counter"))]
        seq: 0,
    })
}
