//! Change detection and callback delivery.
//!
//! This module connects signal handles to the driver. It provides:
//! 1. **Callback identifiers:** Opaque references to driver-side processes.
//! 2. **Change set:** The handles checked for a value transition at each phase boundary.
//! 3. **Pending event queue:** Callbacks triggered by detected transitions, in order.

/// Opaque callback identifiers.
pub mod callback;

/// Set of handles checked for changes.
pub mod change_set;

/// Queue of triggered callbacks.
pub mod queue;

pub use callback::CallbackId;
pub use change_set::ChangeSet;
pub use queue::PendingEventQueue;
