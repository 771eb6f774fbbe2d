//! Error taxonomy for the bridge.
//!
//! This module defines every failure a driver can observe. It provides:
//! 1. **Registration Errors:** Unsupported shapes and malformed construction.
//! 2. **Access Errors:** Capability and range violations on writes.
//! 3. **Sequencing Errors:** Advancing the phase sequence past the end of simulation.
//! 4. **Fatal Step Faults:** Failure to grow the pending event queue.
//!
//! All detection is local: a failed write or registration leaves memory, caches and
//! the namespace exactly as they were before the call.

use std::collections::TryReserveError;

use thiserror::Error;

use super::addr::{SignalAddr, SignalId};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Why a write was refused by the capability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteDenied {
    /// The handle was registered read-only (e.g. a design output).
    ReadOnly,
    /// The shared write gate is closed: the current step has committed.
    GateClosed,
}

impl WriteDenied {
    const fn describe(self) -> &'static str {
        match self {
            Self::ReadOnly => "signal is read-only",
            Self::GateClosed => "writes are closed until the next reset",
        }
    }
}

impl std::fmt::Display for WriteDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Malformed handle or namespace setup.
///
/// These abort session setup; a harness should not continue with a partially
/// registered design.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A signal was declared with a width of zero bits.
    #[error("signal `{path}` has zero bit width")]
    ZeroWidth {
        /// Full dotted path of the signal.
        path: String,
    },

    /// The signal's byte range does not lie inside the session's signal memory.
    #[error("signal `{path}` at {addr} ({byte_width} bytes) is outside signal memory of {memory_len} bytes")]
    AddressOutOfBounds {
        /// Full dotted path of the signal.
        path: String,
        /// Start of the signal's storage.
        addr: SignalAddr,
        /// Number of bytes the signal occupies.
        byte_width: usize,
        /// Size of the session's signal memory.
        memory_len: usize,
    },

    /// The path is empty or contains an empty segment.
    #[error("invalid signal path `{path}`")]
    InvalidPath {
        /// The offending path as written.
        path: String,
    },

    /// The path collides with an existing node of a different kind.
    #[error("path `{path}` conflicts with an existing {existing}")]
    PathConflict {
        /// The prefix at which the collision was found.
        path: String,
        /// Kind of node already bound there ("signal" or "scope").
        existing: &'static str,
    },

    /// The path is already bound to a signal with a different layout.
    #[error("signal `{path}` is already registered with a different layout")]
    DuplicateSignal {
        /// Full dotted path of the signal.
        path: String,
    },
}

/// Errors surfaced to the driver.
#[derive(Debug, Error)]
pub enum SimError {
    /// Unsupported signal dimensionality or width; fatal to that registration only.
    #[error("unsupported shape for `{path}`: {reason}")]
    Shape {
        /// Full dotted path of the signal.
        path: String,
        /// Human-readable description of the unsupported shape.
        reason: String,
    },

    /// A write was refused; simulation state is unaffected.
    #[error("cannot write `{signal}`: {denied}")]
    Capability {
        /// Physical name of the signal.
        signal: String,
        /// Which capability check failed.
        denied: WriteDenied,
    },

    /// The value does not fit the declared width; no partial write occurred.
    #[error("value {value} does not fit {} {bit_width}-bit signal `{signal}`", signedness(.signed))]
    Range {
        /// Physical name of the signal.
        signal: String,
        /// The rejected value.
        value: i128,
        /// Declared width of the signal.
        bit_width: u32,
        /// Whether the signal is interpreted as two's complement.
        signed: bool,
    },

    /// The phase sequence was advanced past the end of simulation without a reset.
    #[error("simulation has ended; reset before advancing again")]
    SequenceExhausted,

    /// Malformed handle or namespace setup.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// A signal identifier that does not belong to this session.
    #[error("unknown signal {0}")]
    UnknownSignal(SignalId),

    /// The pending event queue could not grow; fatal to the current step.
    #[error("pending event queue allocation failed")]
    EventQueue(#[from] TryReserveError),

    /// Configuration or signal table JSON could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn signedness(signed: &bool) -> &'static str {
    if *signed { "signed" } else { "unsigned" }
}

impl SimError {
    /// Returns `true` for errors the driver can recover from without tearing
    /// down the session.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Capability { .. } | Self::Range { .. } | Self::SequenceExhausted | Self::UnknownSignal(_)
        )
    }
}
