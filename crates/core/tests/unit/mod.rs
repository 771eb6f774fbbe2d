//! # Unit Components
//!
//! Tests grouped by the bridge module they exercise.


/// Session configuration and signal table decoding.
pub mod config;


/// Hierarchical namespace registration and lookup.
pub mod namespace;


/// Statistics counters and summary.
pub mod stats;
