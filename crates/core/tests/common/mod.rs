/// Session builders and tracing setup.
pub mod harness;


/// Fixture backends.
pub mod models;
