// Error types for workshop operations

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Result type alias for workshop operations
pub type Result<T> = std::result::Result<T, WorkshopError>;

/// Errors that can occur while handling workshops
#[derive(Debug, Error)]
pub enum WorkshopError {
    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Workshop not found
    #[error("Workshop not found: {0}")]
    NotFound(i64),

    /// Storage backend error
    #[error("Store error: {0}")]
    Store(String),
}

impl WorkshopError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        WorkshopError::Store(msg.into())
    }

    /// Create a not found error
    pub fn not_found(id: i64) -> Self {
        WorkshopError::NotFound(id)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkshopError::NotFound(_))
    }
}

impl From<FieldErrors> for WorkshopError {
    fn from(errors: FieldErrors) -> Self {
        WorkshopError::Validation(errors)
    }
}

/// Validation messages keyed by field name.
///
/// Insertion order is preserved, both in iteration and when serialized as a
/// JSON object, so clients see fields in the order they were validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, appending to any earlier messages for it
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Field names in the order they were first recorded
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, (field, messages)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}
