//! Common types shared by every part of the bridge.
//!
//! This module provides:
//! 1. **Identifiers:** Strong types for signal memory offsets and handle indices.
//! 2. **Constants:** Width limits of the supported memory layout.
//! 3. **Error Handling:** The crate-wide `SimError` taxonomy and `Result` alias.

/// Signal memory offsets and handle identifiers.
pub mod addr;

/// Layout constants.
pub mod constants;

/// Error taxonomy.
pub mod error;

pub use addr::{SignalAddr, SignalId};
pub use constants::{MAX_BIT_WIDTH, PATH_SEPARATOR};
pub use error::{ConstructionError, Result, SimError, WriteDenied};
