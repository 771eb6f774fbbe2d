//! Opaque callback identifiers.
//!
//! The core never calls back into the driver. A driver registers a `CallbackId` on
//! a signal, the id travels into the pending event queue when the signal changes,
//! and the driver maps it back to its own process when it drains the queue.

use std::fmt;

/// Identifier of a driver-side process waiting on a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(pub u64);

impl CallbackId {
    /// Returns the raw identifier.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl From<u64> for CallbackId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cb{}", self.0)
    }
}
