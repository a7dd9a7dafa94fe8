// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Workshops API.
// It is used by both the API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::api::{ErrorResponse, ValidationErrorResponse};
use utoipa::OpenApi;
use workshops_core::Workshop;

/// OpenAPI documentation for the Workshops API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::workshops::list_workshops,
        api::workshops::create_workshop,
        api::workshops::get_workshop,
        api::workshops::replace_workshop,
        api::workshops::update_workshop,
        api::workshops::delete_workshop,
    ),
    components(
        schemas(
            Workshop,
            api::workshops::WorkshopRequest,
            ErrorResponse,
            ValidationErrorResponse,
        )
    ),
    tags(
        (name = "workshops", description = "Workshop management endpoints")
    ),
    info(
        title = "Workshops API",
        version = "0.1.0",
        description = "API for creating, listing, updating and deleting workshops",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_workshop_paths() {
        let spec: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();

        let paths = spec["paths"].as_object().unwrap();
        assert!(paths.contains_key("/workshops/"));
        assert!(paths.contains_key("/workshops/{workshop_id}/"));

        let item = &paths["/workshops/{workshop_id}/"];
        for method in ["get", "put", "patch", "delete"] {
            assert!(item.get(method).is_some(), "missing {method}");
        }
        assert!(spec["components"]["schemas"].get("Workshop").is_some());
    }
}
