//! Step coordinator.
//!
//! Turns one backend step into a resumable sequence of phase boundaries. Each call to
//! [`StepCoordinator::advance`] runs the backend up to the next boundary, evaluates
//! the change set there, and returns the boundary to the driver. The driver drains
//! the pending events, may write inputs while the gate is open, and calls `advance`
//! again to resume exactly where the sequence stopped.
//!
//! Writes are accepted at `CombUpdateDone`. If one changed a signal, the next advance
//! discards the partial evaluation and settles again, yielding a fresh
//! `CombUpdateDone`; otherwise it commits the step and closes the write gate. The gate
//! reopens when the next step opens, on [`reset`](StepCoordinator::reset) and on
//! [`set_write_only`](StepCoordinator::set_write_only).

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::common::{Result, SignalAddr, SignalId, SimError};
use crate::config::SessionConfig;
use crate::events::{ChangeSet, PendingEventQueue};
use crate::signal::{SignalHandle, SignalMemory, WriteGate};
use crate::stats::SessionStats;

use super::model::RtlModel;
use super::phase::{Phase, StepState};

/// Session state the coordinator needs while advancing.
///
/// Built by the session from disjoint borrows of its fields for the duration of one
/// call.
#[allow(missing_debug_implementations)]
pub struct StepContext<'a> {
    /// The backend.
    pub model: &'a mut dyn RtlModel,
    /// Signal memory evaluated by the backend.
    pub memory: &'a mut SignalMemory,
    /// Handle arena.
    pub handles: &'a mut [SignalHandle],
    /// Handles checked for changes.
    pub change_set: &'a ChangeSet,
    /// Destination of triggered callbacks.
    pub queue: &'a mut PendingEventQueue,
    /// Registered signals by storage address, used to name clocks.
    pub by_addr: &'a HashMap<SignalAddr, SignalId>,
    /// Session configuration.
    pub config: &'a SessionConfig,
    /// Session counters.
    pub stats: &'a mut SessionStats,
}

impl StepContext<'_> {
    fn evaluate(&mut self) -> Result<()> {
        let before = self.queue.len();
        let changed = self.change_set.evaluate_and_drain(
            self.handles,
            self.memory,
            self.queue,
            self.config.trace_changes,
        )?;
        self.stats.changes_detected += changed as u64;
        self.stats.events_queued += (self.queue.len() - before) as u64;
        Ok(())
    }
}

/// Phase state machine of one session.
#[derive(Debug)]
pub struct StepCoordinator {
    state: StepState,
    gate: WriteGate,
}

impl StepCoordinator {
    /// Creates an idle coordinator controlling `gate`.
    pub const fn new(gate: WriteGate) -> Self {
        Self {
            state: StepState::Idle,
            gate,
        }
    }

    /// Current position in the phase sequence.
    pub const fn state(&self) -> StepState {
        self.state
    }

    /// Runs the backend to the next phase boundary.
    ///
    /// # Returns
    ///
    /// The boundary reached, or `None` exactly once when the backend reports the end
    /// of simulation.
    ///
    /// # Errors
    ///
    /// [`SimError::SequenceExhausted`] when called after the end of simulation without
    /// a reset, and [`SimError::EventQueue`] if the change-set drain fails. After a
    /// drain failure the step is left open; the driver should reset.
    pub fn advance(&mut self, cx: &mut StepContext<'_>) -> Result<Option<Phase>> {
        let next = match self.state {
            StepState::Ended => return Err(SimError::SequenceExhausted),
            StepState::Idle => {
                self.gate.open();
                self.settle(cx)?
            }
            StepState::AwaitingCombSettle => self.settle(cx)?,
            StepState::AwaitingEdge => {
                if self.gate.take_written() {
                    debug!("inputs written at CombUpdateDone, settling again");
                    cx.model.reset_eval();
                    self.settle(cx)?
                } else {
                    self.gate.close();
                    Some(self.next_edge_or_finish(cx)?)
                }
            }
            StepState::AwaitingEndOfStep { clock } => {
                cx.model.eval_edge(cx.memory, clock);
                self.state = StepState::SettlingAfterEdge;
                self.settle_after_edge(cx)?
            }
            StepState::SettlingAfterEdge => self.settle_after_edge(cx)?,
        };
        let Some(phase) = next else {
            return Ok(self.end());
        };

        cx.stats.phases += 1;
        if cx.config.trace_phases {
            trace!(%phase, queued = cx.queue.len(), "phase boundary");
        }
        Ok(Some(phase))
    }

    /// Settles combinational logic at the start of a step, or again after writes.
    fn settle(&mut self, cx: &mut StepContext<'_>) -> Result<Option<Phase>> {
        self.state = StepState::AwaitingCombSettle;
        let _ = self.gate.take_written();
        cx.model.eval_comb(cx.memory);
        if cx.model.finished() {
            return Ok(None);
        }
        cx.evaluate()?;
        self.state = StepState::AwaitingEdge;
        Ok(Some(Phase::CombUpdateDone))
    }

    /// Settles after an evaluated edge. The edge is already consumed, so a retry
    /// after a failed drain only settles again.
    fn settle_after_edge(&mut self, cx: &mut StepContext<'_>) -> Result<Option<Phase>> {
        cx.model.eval_comb(cx.memory);
        if cx.model.finished() {
            return Ok(None);
        }
        self.next_edge_or_finish(cx).map(Some)
    }

    fn next_edge_or_finish(&mut self, cx: &mut StepContext<'_>) -> Result<Phase> {
        if let Some(clock) = cx.model.pending_edge(cx.memory) {
            if cx.config.eval_before_edge {
                cx.evaluate()?;
            }
            self.state = StepState::AwaitingEndOfStep { clock };
            cx.stats.edges += 1;
            return Ok(Phase::BeforeEdge {
                clock: cx.by_addr.get(&clock).copied(),
            });
        }

        cx.evaluate()?;
        self.state = StepState::Idle;
        cx.stats.steps += 1;
        Ok(Phase::EndOfStep)
    }

    fn end(&mut self) -> Option<Phase> {
        debug!("simulation ended");
        self.state = StepState::Ended;
        None
    }

    /// Aborts any open step and returns to `Idle`.
    ///
    /// Reopens the write gate and clears the pending event queue so no partially
    /// dispatched callbacks leak across the reset. Calling it again has no further
    /// effect on the state.
    pub fn reset(&mut self, model: &mut dyn RtlModel, queue: &mut PendingEventQueue) {
        if self.state.in_progress() {
            debug!(state = ?self.state, "aborting open step");
            model.reset_eval();
        }
        self.state = StepState::Idle;
        self.gate.open();
        queue.clear();
    }

    /// Reopens the write gate without touching the phase sequence.
    pub fn set_write_only(&self) {
        self.gate.open();
    }
}
