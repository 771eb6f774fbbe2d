//! Signal memory offsets and handle identifiers.
//!
//! Handles never hold pointers into the simulator's memory. They hold a
//! `SignalAddr`, a byte offset into the `SignalMemory` arena owned by the session,
//! and they are themselves addressed by `SignalId`, an index into the session's
//! handle arena carrying the tag of the session that issued it. Both are only
//! meaningful inside that session.

use std::fmt;

use serde::Deserialize;

/// Byte offset of a signal's storage inside the session's signal memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct SignalAddr(pub usize);

impl SignalAddr {
    /// Creates a signal address from a raw byte offset.
    #[inline(always)]
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Returns the raw byte offset.
    #[inline(always)]
    pub const fn val(self) -> usize {
        self.0
    }

    /// Returns the address `bytes` past this one, or `None` on overflow.
    pub const fn checked_add(self, bytes: usize) -> Option<Self> {
        match self.0.checked_add(bytes) {
            Some(end) => Some(Self(end)),
            None => None,
        }
    }
}

impl fmt::Display for SignalAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Index of a signal handle, tagged with the session that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalId {
    session: u64,
    index: usize,
}

impl SignalId {
    pub(crate) const fn new(session: u64, index: usize) -> Self {
        Self { session, index }
    }

    /// Returns the arena index of this handle.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Tag of the session that issued this id.
    #[inline(always)]
    pub const fn session(self) -> u64 {
        self.session
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.session, self.index)
    }
}
