// Core traits for pluggable backends
//
// WorkshopStore lets the service layer run against different backends:
// - In-memory implementation for dev mode and tests
// - PostgreSQL implementation for production

use async_trait::async_trait;

use crate::error::Result;
use crate::workshop::{NewWorkshop, Workshop, WorkshopFilter, WorkshopPatch};

/// Trait for workshop persistence
///
/// Each call is one atomic operation against the backend. Inputs are
/// already validated; stores only assign `id` and `created_at`.
#[async_trait]
pub trait WorkshopStore: Send + Sync {
    /// Persist a new workshop and return it with its assigned id
    async fn create(&self, input: NewWorkshop) -> Result<Workshop>;

    /// Fetch a workshop by id
    async fn get(&self, id: i64) -> Result<Option<Workshop>>;

    /// List workshops matching the filter, ordered by id
    async fn list(&self, filter: &WorkshopFilter) -> Result<Vec<Workshop>>;

    /// Apply a patch; returns `None` when the id is unknown
    async fn update(&self, id: i64, patch: WorkshopPatch) -> Result<Option<Workshop>>;

    /// Remove a workshop; returns whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Human-readable backend name for health reporting and logs
    fn backend_name(&self) -> &'static str;
}
