//! Phase markers and step states.

use std::fmt;

use crate::common::{SignalAddr, SignalId};

/// Boundary of a simulation step at which the driver regains control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Combinational logic has settled. Writes are accepted: the gate is open from
    /// the moment a step opens, and after any write that changes a signal the next
    /// advance settles again and yields another `CombUpdateDone` before the step
    /// commits.
    CombUpdateDone,
    /// A clock has changed and its edge-triggered logic is about to run. Read only.
    BeforeEdge {
        /// The clock of the upcoming edge, if it was registered as a signal.
        clock: Option<SignalId>,
    },
    /// Every part of the circuit is updated and stable. Read only.
    EndOfStep,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CombUpdateDone => write!(f, "CombUpdateDone"),
            Self::BeforeEdge { clock: Some(clock) } => write!(f, "BeforeEdge({clock})"),
            Self::BeforeEdge { clock: None } => write!(f, "BeforeEdge"),
            Self::EndOfStep => write!(f, "EndOfStep"),
        }
    }
}

/// Position of the step coordinator in the phase sequence.
///
/// The cycle is `Idle → AwaitingCombSettle → AwaitingEdge → AwaitingEndOfStep →
/// SettlingAfterEdge → Idle`; the last two repeat once per edge of the step. `Ended`
/// is entered when the backend finishes and is left only by a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepState {
    /// No step is open.
    #[default]
    Idle,
    /// A step is open and combinational logic is being settled.
    AwaitingCombSettle,
    /// Suspended at `CombUpdateDone`; the next advance commits the step, or settles
    /// again if inputs were written.
    AwaitingEdge,
    /// Suspended at `BeforeEdge`; the next advance evaluates the edge of `clock`.
    AwaitingEndOfStep {
        /// Clock whose edge was announced.
        clock: SignalAddr,
    },
    /// The announced edge was evaluated; combinational logic is settling after it.
    SettlingAfterEdge,
    /// The backend finished; advancing fails until a reset.
    Ended,
}

impl StepState {
    /// Returns `true` while a step is open.
    pub const fn in_progress(self) -> bool {
        matches!(
            self,
            Self::AwaitingCombSettle
                | Self::AwaitingEdge
                | Self::AwaitingEndOfStep { .. }
                | Self::SettlingAfterEdge
        )
    }
}
