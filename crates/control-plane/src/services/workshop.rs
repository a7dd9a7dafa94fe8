// Workshop service for business logic

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use workshops_core::{Result, Workshop, WorkshopError, WorkshopFilter, WorkshopStore};

use crate::api::validation::{validate_new_workshop, validate_workshop_patch};
use crate::api::workshops::WorkshopRequest;

/// Source of "now" for the not-in-the-past rule
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct WorkshopService {
    store: Arc<dyn WorkshopStore>,
    clock: Clock,
}

impl WorkshopService {
    pub fn new(store: Arc<dyn WorkshopStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    pub fn with_clock(store: Arc<dyn WorkshopStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    #[instrument(name = "workshops.service.create", skip(self, req), fields(workshop.id))]
    pub async fn create(&self, req: WorkshopRequest) -> Result<Workshop> {
        let input = validate_new_workshop(&req, (self.clock)())?;
        let workshop = self.store.create(input).await?;

        tracing::Span::current().record("workshop.id", workshop.id);
        info!(name = %workshop.name, category = %workshop.category, "Workshop created");
        Ok(workshop)
    }

    #[instrument(name = "workshops.service.list", skip(self), fields(category = ?filter.category))]
    pub async fn list(&self, filter: WorkshopFilter) -> Result<Vec<Workshop>> {
        let workshops = self.store.list(&filter).await?;
        debug!(count = workshops.len(), "Listed workshops");
        Ok(workshops)
    }

    #[instrument(name = "workshops.service.get", skip(self), fields(workshop.id = id))]
    pub async fn get(&self, id: i64) -> Result<Workshop> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| WorkshopError::not_found(id))
    }

    /// Apply only the provided fields
    #[instrument(name = "workshops.service.update", skip(self, req), fields(workshop.id = id))]
    pub async fn update(&self, id: i64, req: WorkshopRequest) -> Result<Workshop> {
        self.ensure_exists(id).await?;
        let patch = validate_workshop_patch(&req, (self.clock)())?;
        if patch.is_empty() {
            debug!("Empty patch, returning current workshop");
        }

        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| WorkshopError::not_found(id))
    }

    /// Replace every mutable field; `id` and `created_at` are preserved
    #[instrument(name = "workshops.service.replace", skip(self, req), fields(workshop.id = id))]
    pub async fn replace(&self, id: i64, req: WorkshopRequest) -> Result<Workshop> {
        self.ensure_exists(id).await?;
        let input = validate_new_workshop(&req, (self.clock)())?;

        self.store
            .update(id, input.into())
            .await?
            .ok_or_else(|| WorkshopError::not_found(id))
    }

    #[instrument(name = "workshops.service.delete", skip(self), fields(workshop.id = id))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.store.delete(id).await? {
            info!("Workshop deleted");
            Ok(())
        } else {
            Err(WorkshopError::not_found(id))
        }
    }

    async fn ensure_exists(&self, id: i64) -> Result<()> {
        match self.store.get(id).await? {
            Some(_) => Ok(()),
            None => Err(WorkshopError::not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::create_in_memory_workshop_store;
    use chrono::Duration;
    use serde_json::{json, Value};

    fn service() -> WorkshopService {
        WorkshopService::new(create_in_memory_workshop_store())
    }

    fn request(value: Value) -> WorkshopRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_request(name: &str, category: &str) -> WorkshopRequest {
        request(json!({
            "name": name,
            "description": "Desc",
            "start_date": (Utc::now() + Duration::days(1)).to_rfc3339(),
            "category": category
        }))
    }

    #[tokio::test]
    async fn test_create_round_trips_fields() {
        let service = service();
        let start = Utc::now() + Duration::days(2);

        let created = service
            .create(request(json!({
                "name": "Test Workshop",
                "description": "Test description",
                "start_date": start.to_rfc3339(),
                "category": "Test"
            })))
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Test Workshop");
        assert_eq!(fetched.description, "Test description");
        assert_eq!(fetched.start_date, start);
        assert_eq!(fetched.category, "Test");
    }

    #[tokio::test]
    async fn test_invalid_create_persists_nothing() {
        let service = service();

        let err = service
            .create(request(json!({"name": "", "category": "Dev"})))
            .await
            .unwrap_err();
        match err {
            WorkshopError::Validation(errors) => {
                assert!(errors.contains("name"));
                assert!(errors.contains("start_date"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(service.list(WorkshopFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_before_validation() {
        let service = service();
        let err = service
            .update(99, request(json!({"name": ""})))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_past_workshop_without_start_date() {
        let store = create_in_memory_workshop_store();
        let created = WorkshopService::new(store.clone())
            .create(valid_request("Soon", "Dev"))
            .await
            .unwrap();

        // Two days later the workshop has already started
        let later = created.start_date + Duration::days(1);
        let service = WorkshopService::with_clock(store, Arc::new(move || later));

        let renamed = service
            .update(created.id, request(json!({"name": "Renamed"})))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Renamed");

        let err = service
            .update(
                created.id,
                request(json!({"start_date": created.start_date.to_rfc3339()})),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WorkshopError::Validation(_)));
    }

    #[tokio::test]
    async fn test_replace_requires_all_fields() {
        let service = service();
        let created = service.create(valid_request("Old", "Dev")).await.unwrap();

        let err = service
            .replace(created.id, request(json!({"name": "New"})))
            .await
            .unwrap_err();
        match err {
            WorkshopError::Validation(errors) => {
                assert_eq!(
                    errors.fields().collect::<Vec<_>>(),
                    vec!["start_date", "category"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let replaced = service
            .replace(created.id, valid_request("New", "Design"))
            .await
            .unwrap();
        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.created_at, created.created_at);
        assert_eq!(replaced.name, "New");
        assert_eq!(replaced.category, "Design");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let created = service.create(valid_request("To delete", "Dev")).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(service.get(created.id).await.unwrap_err().is_not_found());
        assert!(service.delete(created.id).await.unwrap_err().is_not_found());
    }
}
