//! Session configuration.
//!
//! This module defines the knobs of a simulation session. It provides:
//! 1. **Defaults:** Baseline behavior when a field is not given.
//! 2. **Structures:** `SessionConfig` and the `SignalDecl` records of a signal table.
//!
//! Configuration is supplied as JSON by the harness, or built with
//! `SessionConfig::default()`.

use serde::Deserialize;

use crate::common::{Result, SignalAddr};
use crate::signal::Access;

/// Default configuration constants.
mod defaults {
    /// Phase transitions are not traced unless asked for.
    pub const TRACE_PHASES: bool = false;

    /// Per-signal change events are not traced unless asked for.
    pub const TRACE_CHANGES: bool = false;

    /// The change set is evaluated at before-edge boundaries so waiters on a clock
    /// see its transition before the registers update.
    pub const EVAL_BEFORE_EDGE: bool = true;
}

/// Behavior of a simulation session.
///
/// # Examples
///
/// ```
/// use rtlbridge_core::SessionConfig;
///
/// let config = SessionConfig::from_json(r#"{ "trace_phases": true }"#).unwrap();
/// assert!(config.trace_phases);
/// assert!(config.eval_before_edge);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Emit a trace event for every phase boundary reached.
    pub trace_phases: bool,
    /// Emit a trace event for every signal found changed.
    pub trace_changes: bool,
    /// Evaluate the change set at before-edge boundaries, not only at stable ones.
    pub eval_before_edge: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trace_phases: defaults::TRACE_PHASES,
            trace_changes: defaults::TRACE_CHANGES,
            eval_before_edge: defaults::EVAL_BEFORE_EDGE,
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`](crate::SimError::Config) for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One entry of a generated signal table.
///
/// A layout generator for a specific design emits one record per accessible signal;
/// `Session::register_table` registers them in order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignalDecl {
    /// Full dotted path of the signal.
    pub path: String,
    /// Offset of the signal's storage in signal memory.
    pub offset: SignalAddr,
    /// Declared width in bits.
    pub bit_width: u32,
    /// Two's-complement interpretation.
    #[serde(default)]
    pub signed: bool,
    /// Whether the driver may write the signal.
    #[serde(default)]
    pub writable: bool,
    /// Backend-reported dimensions; anything but a scalar is rejected.
    #[serde(default)]
    pub type_width: Vec<usize>,
}

impl SignalDecl {
    /// Access mode of the declared signal.
    pub const fn access(&self) -> Access {
        Access::from_writable(self.writable)
    }
}

/// A complete signal table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SignalTable {
    /// Declared signals, in registration order.
    pub signals: Vec<SignalDecl>,
}

impl SignalTable {
    /// Parses a signal table from JSON.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`](crate::SimError::Config) for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
