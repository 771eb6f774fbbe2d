//! Backend evaluation trait.
//!
//! The step coordinator does not know how the design is evaluated. It only asks the
//! backend to settle combinational logic, to name the clock of the next edge-triggered
//! block due in this step, and to evaluate that block. Everything the backend computes
//! lives in the session's `SignalMemory`, which it receives on every call.

use crate::common::SignalAddr;
use crate::signal::SignalMemory;

/// A compiled design that can be evaluated phase by phase.
///
/// One step of the backend is:
///
/// 1. [`eval_comb`](Self::eval_comb) until combinational logic is stable;
/// 2. for every edge-triggered block due in this step, in order: the clock is reported
///    by [`pending_edge`](Self::pending_edge) (its new value is already in memory, no
///    register has been updated yet), then [`eval_edge`](Self::eval_edge) updates the
///    registers and [`eval_comb`](Self::eval_comb) settles again;
/// 3. once `pending_edge` returns `None`, the step is over and memory is stable.
pub trait RtlModel {
    /// Name of the design, for diagnostics.
    fn name(&self) -> &str {
        "rtl"
    }

    /// Settles all logic that does not depend on a clock edge.
    fn eval_comb(&mut self, memory: &mut SignalMemory);

    /// Returns the clock of the next edge-triggered block due in this step.
    ///
    /// The edge stays pending until the matching [`eval_edge`](Self::eval_edge), so
    /// repeated calls without evaluation return the same clock.
    fn pending_edge(&mut self, memory: &SignalMemory) -> Option<SignalAddr>;

    /// Evaluates the blocks sensitive to the edge of `clock` and consumes the edge.
    fn eval_edge(&mut self, memory: &mut SignalMemory, clock: SignalAddr);

    /// Discards a partially evaluated step; the next `eval_comb` starts afresh.
    fn reset_eval(&mut self) {}

    /// Returns `true` once the design has requested the end of simulation.
    fn finished(&self) -> bool {
        false
    }
}
