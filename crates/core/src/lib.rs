//! Signal-memory bridge between a cycle-based RTL simulator and an external driver.
//!
//! This crate sits between a simulator backend that keeps every scalar signal in
//! its own little-endian byte buffer and a driver that wants to observe and stimulate
//! those signals. It provides:
//! 1. **Signals:** Handles over the session-owned signal memory with width/sign
//!    metadata, a change cache and per-signal callback lists.
//! 2. **Namespace:** Hierarchical dotted-path lookup of registered signals.
//! 3. **Events:** The change set checked at every phase boundary and the queue of
//!    triggered callbacks the driver drains.
//! 4. **Stepping:** A resumable phase state machine (combinational settle, before
//!    edge, end of step) with a shared write gate.
//! 5. **Session:** Configuration, statistics and the arena that ties it together.

/// Error taxonomy, constants and identifier newtypes.
pub mod common;
/// Session configuration (defaults, JSON deserialization).
pub mod config;
/// Callback identifiers, the change set and the pending event queue.
pub mod events;
/// Hierarchical signal namespace.
pub mod namespace;
/// Signal memory, handles, the write gate and the value codec.
pub mod signal;
/// Backend trait, phase markers, step coordinator and session.
pub mod sim;
/// Session statistics collection.
pub mod stats;

/// Crate-wide error type.
pub use crate::common::error::{Result, SimError};
/// Session configuration; use `SessionConfig::default()` or `SessionConfig::from_json`.
pub use crate::config::SessionConfig;
/// Opaque identifier for a driver-side callback.
pub use crate::events::CallbackId;
/// Phase boundary marker returned by `Session::advance_one_phase`.
pub use crate::sim::phase::Phase;
/// Backend evaluation trait.
pub use crate::sim::model::RtlModel;
/// Top-level simulation session.
pub use crate::sim::session::Session;
/// Signal memory arena and signal handle types.
pub use crate::signal::{Access, SignalAddr, SignalHandle, SignalId, SignalMemory};
