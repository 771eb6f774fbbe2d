//! Change set.
//!
//! The handles that have (or had) a callback waiting on them. At each phase
//! boundary the step coordinator evaluates the set: every handle whose bytes differ
//! from its cache moves its callbacks into the pending event queue and then refreshes
//! its cache. The refresh comes last so a write scheduled while the callbacks are
//! being queued is still seen as a change by the next evaluation.

use std::collections::HashSet;

use tracing::trace;

use crate::common::{Result, SignalId};
use crate::signal::{SignalHandle, SignalMemory};

use super::PendingEventQueue;

/// Insertion-ordered set of handles checked for changes.
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    order: Vec<SignalId>,
    members: HashSet<SignalId>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` to the set.
    ///
    /// # Returns
    ///
    /// `true` if the handle was not already a member.
    pub fn insert(&mut self, id: SignalId) -> bool {
        let fresh = self.members.insert(id);
        if fresh {
            self.order.push(id);
        }
        fresh
    }

    /// Returns `true` if `id` is a member.
    pub fn contains(&self, id: SignalId) -> bool {
        self.members.contains(&id)
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = SignalId> + '_ {
        self.order.iter().copied()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Detects changed members and drains their callbacks into `queue`.
    ///
    /// Members are visited in insertion order and each handle's callbacks keep their
    /// registration order. For a changed handle the callbacks are appended, the
    /// handle's list is emptied, and only then is its cache refreshed. Unchanged
    /// handles are left untouched.
    ///
    /// # Arguments
    ///
    /// * `handles` - The session's handle arena, indexed by `SignalId`.
    /// * `memory` - Current signal memory.
    /// * `queue` - Destination of triggered callbacks.
    /// * `log_changes` - Emit a trace event per changed handle.
    ///
    /// # Returns
    ///
    /// The number of handles found changed.
    ///
    /// # Errors
    ///
    /// [`SimError::EventQueue`](crate::SimError::EventQueue) if the queue cannot grow.
    /// The failing handle keeps its callbacks and its stale cache, so the change is
    /// still pending; the error is fatal to the current step.
    pub fn evaluate_and_drain(
        &self,
        handles: &mut [SignalHandle],
        memory: &SignalMemory,
        queue: &mut PendingEventQueue,
        log_changes: bool,
    ) -> Result<usize> {
        let mut changed = 0;
        for id in &self.order {
            let Some(handle) = handles.get_mut(id.index()) else {
                continue;
            };
            if !handle.has_changed(memory) {
                continue;
            }
            if log_changes {
                trace!(
                    signal = handle.name(),
                    value = %handle.read(memory),
                    callbacks = handle.callbacks().len(),
                    "signal changed"
                );
            }
            queue.try_extend(handle.callbacks())?;
            handle.clear_callbacks();
            handle.cache_store(memory);
            changed += 1;
        }
        Ok(changed)
    }
}
