// Storage-backed WorkshopStore implementation
//
// This module implements the core WorkshopStore trait on top of the
// storage backends. Storage errors are logged here and surfaced as
// WorkshopError::Store so callers never see backend-specific types.

use async_trait::async_trait;
use workshops_core::{
    NewWorkshop, Result, Workshop, WorkshopError, WorkshopFilter, WorkshopPatch, WorkshopStore,
};

use super::backend::StorageBackend;

fn store_error(operation: &'static str) -> impl FnOnce(anyhow::Error) -> WorkshopError {
    move |e| {
        tracing::error!(operation, error = %e, "Workshop storage operation failed");
        WorkshopError::store(e.to_string())
    }
}

#[async_trait]
impl WorkshopStore for StorageBackend {
    async fn create(&self, input: NewWorkshop) -> Result<Workshop> {
        let row = self
            .create_workshop(input)
            .await
            .map_err(store_error("create"))?;
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Workshop>> {
        let row = self.get_workshop(id).await.map_err(store_error("get"))?;
        Ok(row.map(Workshop::from))
    }

    async fn list(&self, filter: &WorkshopFilter) -> Result<Vec<Workshop>> {
        let rows = self
            .list_workshops(filter)
            .await
            .map_err(store_error("list"))?;
        Ok(rows.into_iter().map(Workshop::from).collect())
    }

    async fn update(&self, id: i64, patch: WorkshopPatch) -> Result<Option<Workshop>> {
        let row = self
            .update_workshop(id, patch)
            .await
            .map_err(store_error("update"))?;
        Ok(row.map(Workshop::from))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.delete_workshop(id)
            .await
            .map_err(store_error("delete"))
    }

    fn backend_name(&self) -> &'static str {
        if self.is_dev_mode() {
            "memory"
        } else {
            "postgres"
        }
    }
}

// ============================================================================
// Factory functions
// ============================================================================

/// Create a workshop store backed by in-memory storage
pub fn create_in_memory_workshop_store() -> std::sync::Arc<dyn WorkshopStore> {
    std::sync::Arc::new(StorageBackend::in_memory())
}
