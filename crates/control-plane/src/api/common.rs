// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use workshops_core::{FieldErrors, WorkshopError};

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Field-keyed validation errors: each key is an offending field, each
/// value the messages for that field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"name": ["Name cannot be empty."], "start_date": ["Start date cannot be in the past."]}))]
pub struct ValidationErrorResponse(pub HashMap<String, Vec<String>>);

/// Message returned for unknown workshop ids.
pub const NOT_FOUND_MESSAGE: &str = "Workshop not found";

/// Message returned for storage failures. Details are logged, not returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors returned by workshop handlers
#[derive(Debug)]
pub enum ApiError {
    /// 400 with a field-keyed body
    Validation(FieldErrors),
    /// 400 for bodies that are not a JSON object
    BadRequest(String),
    /// 404
    NotFound,
    /// 500
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WorkshopError> for ApiError {
    fn from(err: WorkshopError) -> Self {
        match err {
            WorkshopError::Validation(errors) => ApiError::Validation(errors),
            WorkshopError::NotFound(_) => ApiError::NotFound,
            // Logged with its cause at the storage seam
            WorkshopError::Store(_) => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            ApiError::BadRequest(message) => ErrorResponse::new(message)
                .into_response(status)
                .into_response(),
            ApiError::NotFound => ErrorResponse::new(NOT_FOUND_MESSAGE)
                .into_response(status)
                .into_response(),
            ApiError::Internal => ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
                .into_response(status)
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(WorkshopError::Validation(FieldErrors::new())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(WorkshopError::not_found(3)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(WorkshopError::store("connection reset")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
