//! Unified error types for the ECS telemetry node.
//!
//! A single `Error` enum that every subsystem can convert into. All variants
//! are `Copy` so they can be passed through the scheduler and emitted as
//! events without allocation.
//!
//! Not-ready conditions (conversion pending, gateway unresolved) are never
//! errors; they are incomplete progress re-evaluated on the next poll.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level node error
// ---------------------------------------------------------------------------

/// Every fallible operation in the node funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
    /// The mesh transport rejected an operation.
    Transport(TransportError),
    /// A wire record could not be encoded or decoded.
    Codec(CodecError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The radio/mesh stack could not be brought up.
    InitFailed,
    /// The link layer refused to queue the frame.
    SendFailed,
    /// Payload exceeds the link-layer frame size.
    PayloadTooLarge,
    /// Destination is not a known peer.
    NoPeer,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "mesh init failed"),
            Self::SendFailed => write!(f, "send failed"),
            Self::PayloadTooLarge => write!(f, "payload too large"),
            Self::NoPeer => write!(f, "unknown peer"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Output buffer cannot hold a full record.
    BufferTooSmall,
    /// Input is not exactly one record long.
    LengthMismatch,
    /// Input bytes do not form a valid record.
    Malformed,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::LengthMismatch => write!(f, "record length mismatch"),
            Self::Malformed => write!(f, "malformed record"),
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Node-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
