// Workshop Domain Abstraction
//
// This crate provides the DB-agnostic pieces shared by storage and the HTTP API.
//
// Key design decisions:
// - Uses a trait (WorkshopStore) for pluggable persistence backends
// - Domain entity types (Workshop, NewWorkshop, WorkshopPatch) are defined here
// - Error handling distinguishes validation, not-found and store failures
// - Telemetry setup lives here so every binary logs the same way

pub mod error;
pub mod telemetry;
pub mod traits;
pub mod workshop;

// Re-exports for convenience
pub use error::{FieldErrors, Result, WorkshopError};
pub use traits::WorkshopStore;
pub use workshop::{NewWorkshop, Workshop, WorkshopFilter, WorkshopPatch};
