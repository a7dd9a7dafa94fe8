// Workshop CRUD HTTP routes

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use workshops_core::{Workshop, WorkshopFilter, WorkshopStore};

use super::common::{ApiError, ErrorResponse, ValidationErrorResponse};
use crate::services::WorkshopService;

/// Workshop payload for create, replace and partial update.
///
/// Fields are kept as raw JSON so that type errors are reported per field.
/// `id` and `created_at` are read-only and ignored if sent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WorkshopRequest {
    /// Workshop title. Required on create; must not be blank.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Intro to Rust")]
    pub name: Option<Value>,
    /// Free text, may be empty.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Ownership and borrowing from scratch")]
    pub description: Option<Value>,
    /// ISO-8601 timestamp. Required on create; must not be in the past.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "2030-05-01T10:00:00Z")]
    pub start_date: Option<Value>,
    /// Filter key. Required on create; must not be blank.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Development")]
    pub category: Option<Value>,
}

// Keeps an explicit `null` as `Some(Value::Null)`; absent fields fall back to `None`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl WorkshopRequest {
    /// Raw value for a payload field. `Some(Value::Null)` means an explicit null.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "name" => self.name.as_ref(),
            "description" => self.description.as_ref(),
            "start_date" => self.start_date.as_ref(),
            "category" => self.category.as_ref(),
            _ => None,
        }
    }
}

/// Query parameters for listing workshops
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListWorkshopsQuery {
    /// Only return workshops with exactly this category.
    #[param(example = "Design")]
    pub category: Option<String>,
}

impl From<ListWorkshopsQuery> for WorkshopFilter {
    fn from(query: ListWorkshopsQuery) -> Self {
        // An empty `?category=` means no filter
        WorkshopFilter {
            category: query.category.filter(|c| !c.is_empty()),
        }
    }
}

/// App state for workshop routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkshopService>,
}

impl AppState {
    pub fn new(store: Arc<dyn WorkshopStore>) -> Self {
        Self {
            service: Arc::new(WorkshopService::new(store)),
        }
    }
}

/// Create workshop routes. Both `/workshops` and `/workshops/` forms are served.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/workshops", get(list_workshops).post(create_workshop))
        .route("/workshops/", get(list_workshops).post(create_workshop))
        .route(
            "/workshops/:workshop_id",
            get(get_workshop)
                .put(replace_workshop)
                .patch(update_workshop)
                .delete(delete_workshop),
        )
        .route(
            "/workshops/:workshop_id/",
            get(get_workshop)
                .put(replace_workshop)
                .patch(update_workshop)
                .delete(delete_workshop),
        )
        .with_state(state)
}

// Non-numeric ids can never exist, so they are reported as not found
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<WorkshopRequest, ApiError> {
    let value = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected workshop body");
            return Err(ApiError::BadRequest(rejection.body_text()));
        }
    };

    // Struct deserialization would also accept a positional array
    if !value.is_object() {
        return Err(ApiError::BadRequest(
            "Invalid data. Expected a JSON object.".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// GET /workshops/ - List workshops
#[utoipa::path(
    get,
    path = "/workshops/",
    params(ListWorkshopsQuery),
    responses(
        (status = 200, description = "List of workshops", body = Vec<Workshop>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "workshops"
)]
pub async fn list_workshops(
    State(state): State<AppState>,
    Query(query): Query<ListWorkshopsQuery>,
) -> Result<Json<Vec<Workshop>>, ApiError> {
    let workshops = state.service.list(query.into()).await?;
    Ok(Json(workshops))
}

/// POST /workshops/ - Create a new workshop
#[utoipa::path(
    post,
    path = "/workshops/",
    request_body = WorkshopRequest,
    responses(
        (status = 201, description = "Workshop created successfully", body = Workshop),
        (status = 400, description = "Invalid payload", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "workshops"
)]
pub async fn create_workshop(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Workshop>), ApiError> {
    let req = parse_body(body)?;
    let workshop = state.service.create(req).await?;

    Ok((StatusCode::CREATED, Json(workshop)))
}

/// GET /workshops/{workshop_id}/ - Get workshop by ID
#[utoipa::path(
    get,
    path = "/workshops/{workshop_id}/",
    params(
        ("workshop_id" = i64, Path, description = "Workshop ID")
    ),
    responses(
        (status = 200, description = "Workshop found", body = Workshop),
        (status = 404, description = "Workshop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "workshops"
)]
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(workshop_id): Path<String>,
) -> Result<Json<Workshop>, ApiError> {
    let id = parse_id(&workshop_id)?;
    let workshop = state.service.get(id).await?;

    Ok(Json(workshop))
}

/// PUT /workshops/{workshop_id}/ - Replace all mutable fields of a workshop
#[utoipa::path(
    put,
    path = "/workshops/{workshop_id}/",
    params(
        ("workshop_id" = i64, Path, description = "Workshop ID")
    ),
    request_body = WorkshopRequest,
    responses(
        (status = 200, description = "Workshop replaced successfully", body = Workshop),
        (status = 400, description = "Invalid payload", body = ValidationErrorResponse),
        (status = 404, description = "Workshop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "workshops"
)]
pub async fn replace_workshop(
    State(state): State<AppState>,
    Path(workshop_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Workshop>, ApiError> {
    let id = parse_id(&workshop_id)?;
    let req = parse_body(body)?;
    let workshop = state.service.replace(id, req).await?;

    Ok(Json(workshop))
}

/// PATCH /workshops/{workshop_id}/ - Update only the provided fields
#[utoipa::path(
    patch,
    path = "/workshops/{workshop_id}/",
    params(
        ("workshop_id" = i64, Path, description = "Workshop ID")
    ),
    request_body = WorkshopRequest,
    responses(
        (status = 200, description = "Workshop updated successfully", body = Workshop),
        (status = 400, description = "Invalid payload", body = ValidationErrorResponse),
        (status = 404, description = "Workshop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "workshops"
)]
pub async fn update_workshop(
    State(state): State<AppState>,
    Path(workshop_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Workshop>, ApiError> {
    let id = parse_id(&workshop_id)?;
    let req = parse_body(body)?;
    let workshop = state.service.update(id, req).await?;

    Ok(Json(workshop))
}

/// DELETE /workshops/{workshop_id}/ - Delete workshop
#[utoipa::path(
    delete,
    path = "/workshops/{workshop_id}/",
    params(
        ("workshop_id" = i64, Path, description = "Workshop ID")
    ),
    responses(
        (status = 204, description = "Workshop deleted successfully"),
        (status = 404, description = "Workshop not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "workshops"
)]
pub async fn delete_workshop(
    State(state): State<AppState>,
    Path(workshop_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&workshop_id)?;
    state.service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_distinguishes_missing_and_null() {
        let req: WorkshopRequest =
            serde_json::from_value(json!({"name": null, "category": "Dev"})).unwrap();

        assert_eq!(req.field("name"), Some(&Value::Null));
        assert_eq!(req.field("category"), Some(&json!("Dev")));
        assert_eq!(req.field("start_date"), None);
        assert_eq!(req.field("unknown"), None);
    }

    #[test]
    fn test_empty_category_query_means_no_filter() {
        let filter: WorkshopFilter = ListWorkshopsQuery {
            category: Some(String::new()),
        }
        .into();
        assert_eq!(filter, WorkshopFilter::default());

        let filter: WorkshopFilter = ListWorkshopsQuery {
            category: Some("Design".to_string()),
        }
        .into();
        assert_eq!(filter, WorkshopFilter::by_category("Design"));
    }

    #[test]
    fn test_parse_body_requires_object() {
        let req = parse_body(Ok(Json(json!({"name": "Rust"})))).unwrap();
        assert_eq!(req.field("name"), Some(&json!("Rust")));

        for body in [json!(["Arr", "d", "2030-01-01T00:00:00Z", "Dev"]), json!([]), json!(7)] {
            assert!(matches!(
                parse_body(Ok(Json(body))),
                Err(ApiError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound)));
    }
}
