//! Pending event queue.
//!
//! Callbacks of changed signals are appended here during change-set evaluation and
//! handed to the driver, in FIFO order, when it drains the queue between phases.

use crate::common::Result;

use super::CallbackId;

/// FIFO of triggered callbacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingEventQueue {
    events: Vec<CallbackId>,
}

impl PendingEventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every callback in `callbacks`, preserving their order.
    ///
    /// Space is reserved up front, so on error the queue is unchanged.
    ///
    /// # Errors
    ///
    /// [`SimError::EventQueue`](crate::SimError::EventQueue) if the queue cannot grow.
    pub fn try_extend(&mut self, callbacks: &[CallbackId]) -> Result<()> {
        self.events.try_reserve(callbacks.len())?;
        self.events.extend_from_slice(callbacks);
        Ok(())
    }

    /// Appends a single callback.
    ///
    /// # Errors
    ///
    /// [`SimError::EventQueue`](crate::SimError::EventQueue) if the queue cannot grow.
    pub fn try_push(&mut self, callback: CallbackId) -> Result<()> {
        self.try_extend(std::slice::from_ref(&callback))
    }

    /// Removes and returns every queued callback, oldest first.
    pub fn drain(&mut self) -> Vec<CallbackId> {
        std::mem::take(&mut self.events)
    }

    /// Discards every queued callback.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the queued callbacks without removing them.
    pub fn as_slice(&self) -> &[CallbackId] {
        &self.events
    }

    /// Returns the number of queued callbacks.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
