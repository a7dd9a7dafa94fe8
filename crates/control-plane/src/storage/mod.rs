// Storage layer for the workshops control-plane
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// StorageBackend implements the core WorkshopStore trait, so services only
// ever see the trait object.

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod workshop_store;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
pub use workshop_store::create_in_memory_workshop_store;
