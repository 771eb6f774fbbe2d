/// Step coordinator and the per-call context it advances over.
pub mod coordinator;
/// Backend evaluation trait.
pub mod model;
/// Phase markers and step states.
pub mod phase;
/// Simulation session.
pub mod session;

pub use coordinator::{StepContext, StepCoordinator};
pub use model::RtlModel;
pub use phase::{Phase, StepState};
pub use session::Session;
