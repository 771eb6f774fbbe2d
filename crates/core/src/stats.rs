//! Session statistics collection and reporting.
//!
//! Counters updated by the session as it steps. They cost one increment each and
//! are always on.

use std::fmt;

/// Counters of one simulation session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Steps that reached the end-of-step boundary.
    pub steps: u64,
    /// Phase boundaries yielded to the driver (the end sentinel excluded).
    pub phases: u64,
    /// Before-edge boundaries yielded.
    pub edges: u64,
    /// Change-set members found changed, summed over all evaluations.
    pub changes_detected: u64,
    /// Callbacks moved into the pending event queue.
    pub events_queued: u64,
    /// Calls to `reset`.
    pub resets: u64,
    /// Successful driver writes.
    pub writes: u64,
    /// Driver writes rejected with a capability or range error.
    pub writes_rejected: u64,
}

impl SessionStats {
    /// Average number of callbacks queued per completed step.
    pub fn events_per_step(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.events_queued as f64 / self.steps as f64
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "steps            {}", self.steps)?;
        writeln!(f, "phases           {}", self.phases)?;
        writeln!(f, "edges            {}", self.edges)?;
        writeln!(f, "changes          {}", self.changes_detected)?;
        writeln!(
            f,
            "events queued    {} ({:.2}/step)",
            self.events_queued,
            self.events_per_step()
        )?;
        writeln!(f, "resets           {}", self.resets)?;
        write!(
            f,
            "writes           {} ({} rejected)",
            self.writes, self.writes_rejected
        )
    }
}
