// Workshop domain types
//
// These types represent the Workshop entity and the inputs used to create,
// patch and filter it. Used by both storage and API crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A scheduled workshop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Workshop {
    /// Store-assigned identifier.
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,
    #[cfg_attr(feature = "openapi", schema(example = "Intro to Rust"))]
    pub name: String,
    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "Development"))]
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Workshop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validated input for a new workshop. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkshop {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub category: String,
}

/// Validated set of field changes. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkshopPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl WorkshopPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.category.is_none()
    }

    /// Apply the provided fields to an existing workshop
    pub fn apply_to(self, workshop: &mut Workshop) {
        if let Some(name) = self.name {
            workshop.name = name;
        }
        if let Some(description) = self.description {
            workshop.description = description;
        }
        if let Some(start_date) = self.start_date {
            workshop.start_date = start_date;
        }
        if let Some(category) = self.category {
            workshop.category = category;
        }
    }
}

/// A full replacement is a patch that sets every mutable field.
impl From<NewWorkshop> for WorkshopPatch {
    fn from(input: NewWorkshop) -> Self {
        Self {
            name: Some(input.name),
            description: Some(input.description),
            start_date: Some(input.start_date),
            category: Some(input.category),
        }
    }
}

/// Exact-match filters for listing workshops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkshopFilter {
    pub category: Option<String>,
}

impl WorkshopFilter {
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }

    /// Whether a workshop in `category` passes the filter
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.as_deref().map_or(true, |wanted| wanted == category)
    }
}
