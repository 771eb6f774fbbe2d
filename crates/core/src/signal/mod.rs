//! Signal storage and proxies.
//!
//! This module provides:
//! 1. **Memory:** The session-owned byte arena holding every signal value.
//! 2. **Handles:** Width/sign-aware proxies with change caches and callbacks.
//! 3. **Write gate:** The shared flag that closes writes after a step commits.
//! 4. **Codec:** Little-endian integer encoding with tail-byte masking.

/// Integer encoding of signal bytes.
pub mod codec;

/// Shared write gate.
pub mod gate;

/// Signal handles.
pub mod handle;

/// Signal memory arena.
pub mod memory;

pub use crate::common::{SignalAddr, SignalId};
pub use gate::WriteGate;
pub use handle::{Access, SignalHandle};
pub use memory::SignalMemory;
