//! Shared write gate.
//!
//! The backend forbids mutating signal state once a step has committed. The gate is
//! the single flag that models this: the step coordinator closes it when the step
//! commits and reopens it when the next step opens or on reset, and every handle
//! checks it on its write path. Each session creates its own gate, so independent
//! sessions never interfere.
//!
//! The gate also records whether any write was accepted since the coordinator last
//! settled combinational logic, so a write made at `CombUpdateDone` is settled
//! before the step commits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct GateFlags {
    read_only: AtomicBool,
    written: AtomicBool,
}

/// Cloneable reference to a session's write gate.
///
/// Clones share the same flags. Handles only [`is_open`](Self::is_open) it; opening
/// and closing is reserved to the step coordinator.
#[derive(Clone, Debug, Default)]
pub struct WriteGate {
    flags: Arc<GateFlags>,
}

impl WriteGate {
    /// Creates an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while writes are permitted.
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.flags.read_only.load(Ordering::Relaxed)
    }

    /// Permits writes again.
    pub(crate) fn open(&self) {
        self.flags.read_only.store(false, Ordering::Relaxed);
    }

    /// Forbids writes until the next [`open`](Self::open).
    pub(crate) fn close(&self) {
        self.flags.read_only.store(true, Ordering::Relaxed);
    }

    /// Notes an accepted write.
    pub(crate) fn mark_written(&self) {
        self.flags.written.store(true, Ordering::Relaxed);
    }

    /// Returns whether a write was accepted since the last call, and clears the mark.
    pub(crate) fn take_written(&self) -> bool {
        self.flags.written.swap(false, Ordering::Relaxed)
    }

    /// Returns `true` if both references share one gate.
    pub fn same_gate(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.flags, &other.flags)
    }
}
