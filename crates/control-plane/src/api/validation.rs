// Input validation for workshop APIs
//
// Field rules are an explicit, ordered table. Every field is checked in table
// order and every failure is reported, so error bodies are stable across runs.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use workshops_core::{FieldErrors, NewWorkshop, WorkshopPatch};

use super::workshops::WorkshopRequest;

// =============================================================================
// Limits and messages
// =============================================================================

/// Maximum length of the name field, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// Maximum length of the category field, in characters.
pub const MAX_CATEGORY_CHARS: usize = 100;

/// Error key for failures not tied to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const NULL_MESSAGE: &str = "This field may not be null.";
pub const NOT_A_STRING_MESSAGE: &str = "Not a valid string.";
pub const EMPTY_NAME_MESSAGE: &str = "Name cannot be empty.";
pub const EMPTY_CATEGORY_MESSAGE: &str = "Category cannot be empty.";
pub const PAST_START_DATE_MESSAGE: &str = "Start date cannot be in the past.";
pub const INCOMPLETE_MESSAGE: &str = "Incomplete workshop payload.";
pub const DATETIME_FORMAT_MESSAGE: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

// =============================================================================
// Field table
// =============================================================================

/// A validated field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Timestamp(DateTime<Utc>),
}

/// Validates one non-null JSON value against the current time
pub type FieldValidator = fn(&Value, DateTime<Utc>) -> Result<FieldValue, String>;

/// Binding of a payload field name to its validator
pub struct FieldRule {
    pub field: &'static str,
    /// Must be present when creating or fully replacing a workshop
    pub required: bool,
    pub validate: FieldValidator,
}

/// Workshop fields in validation (and error reporting) order
pub const WORKSHOP_FIELDS: &[FieldRule] = &[
    FieldRule {
        field: "name",
        required: true,
        validate: validate_name,
    },
    FieldRule {
        field: "description",
        required: false,
        validate: validate_description,
    },
    FieldRule {
        field: "start_date",
        required: true,
        validate: validate_start_date,
    },
    FieldRule {
        field: "category",
        required: true,
        validate: validate_category,
    },
];

/// Whether absent required fields are an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// POST and PUT: required fields must be present
    Full,
    /// PATCH: only provided fields are validated
    Partial,
}

// =============================================================================
// Field validators
// =============================================================================

fn as_text(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| NOT_A_STRING_MESSAGE.to_string())
}

fn required_text(
    value: &Value,
    max_chars: usize,
    empty_message: &str,
) -> Result<FieldValue, String> {
    let text = as_text(value)?.trim();
    if text.is_empty() {
        return Err(empty_message.to_string());
    }
    if text.chars().count() > max_chars {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            max_chars
        ));
    }
    Ok(FieldValue::Text(text.to_string()))
}

/// Name must be non-empty after trimming
pub fn validate_name(value: &Value, _now: DateTime<Utc>) -> Result<FieldValue, String> {
    required_text(value, MAX_NAME_CHARS, EMPTY_NAME_MESSAGE)
}

/// Description is free text and may be empty
pub fn validate_description(value: &Value, _now: DateTime<Utc>) -> Result<FieldValue, String> {
    Ok(FieldValue::Text(as_text(value)?.to_string()))
}

/// Category must be non-empty after trimming
pub fn validate_category(value: &Value, _now: DateTime<Utc>) -> Result<FieldValue, String> {
    required_text(value, MAX_CATEGORY_CHARS, EMPTY_CATEGORY_MESSAGE)
}

/// Start date must parse as ISO-8601 and must not be before `now`
pub fn validate_start_date(value: &Value, now: DateTime<Utc>) -> Result<FieldValue, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| DATETIME_FORMAT_MESSAGE.to_string())?;
    let start_date = parse_timestamp(raw).ok_or_else(|| DATETIME_FORMAT_MESSAGE.to_string())?;
    if start_date < now {
        return Err(PAST_START_DATE_MESSAGE.to_string());
    }
    Ok(FieldValue::Timestamp(start_date))
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Request validation
// =============================================================================

/// Run the field table over a request and collect every failure
pub fn validate_fields(
    req: &WorkshopRequest,
    mode: ValidationMode,
    now: DateTime<Utc>,
) -> Result<WorkshopPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = WorkshopPatch::default();

    for rule in WORKSHOP_FIELDS {
        let value = match req.field(rule.field) {
            None => {
                if rule.required && mode == ValidationMode::Full {
                    errors.add(rule.field, REQUIRED_MESSAGE);
                }
                continue;
            }
            Some(Value::Null) => {
                errors.add(rule.field, NULL_MESSAGE);
                continue;
            }
            Some(value) => value,
        };

        match (rule.validate)(value, now) {
            Ok(validated) => assign(&mut patch, rule.field, validated),
            Err(message) => errors.add(rule.field, message),
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        tracing::debug!(errors = %errors, "Workshop payload rejected");
        Err(errors)
    }
}

fn assign(patch: &mut WorkshopPatch, field: &str, value: FieldValue) {
    match (field, value) {
        ("name", FieldValue::Text(text)) => patch.name = Some(text),
        ("description", FieldValue::Text(text)) => patch.description = Some(text),
        ("start_date", FieldValue::Timestamp(ts)) => patch.start_date = Some(ts),
        ("category", FieldValue::Text(text)) => patch.category = Some(text),
        (field, value) => {
            tracing::warn!(field, ?value, "Validator produced a value for an unknown field");
        }
    }
}

/// Validate a create (POST) or full replacement (PUT) payload
pub fn validate_new_workshop(
    req: &WorkshopRequest,
    now: DateTime<Utc>,
) -> Result<NewWorkshop, FieldErrors> {
    let patch = validate_fields(req, ValidationMode::Full, now)?;
    // Full mode has already reported every missing required field
    let WorkshopPatch {
        name: Some(name),
        description,
        start_date: Some(start_date),
        category: Some(category),
    } = patch
    else {
        let mut errors = FieldErrors::new();
        errors.add(NON_FIELD_ERRORS, INCOMPLETE_MESSAGE);
        return Err(errors);
    };

    Ok(NewWorkshop {
        name,
        description: description.unwrap_or_default(),
        start_date,
        category,
    })
}

/// Validate a partial update (PATCH) payload
pub fn validate_workshop_patch(
    req: &WorkshopRequest,
    now: DateTime<Utc>,
) -> Result<WorkshopPatch, FieldErrors> {
    validate_fields(req, ValidationMode::Partial, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn request(value: Value) -> WorkshopRequest {
        serde_json::from_value(value).unwrap()
    }

    fn future() -> String {
        (Utc::now() + Duration::days(1)).to_rfc3339()
    }

    fn past() -> String {
        (Utc::now() - Duration::days(1)).to_rfc3339()
    }

    #[test]
    fn test_valid_create_payload() {
        let req = request(json!({
            "name": "API Workshop",
            "description": "Created via API",
            "start_date": future(),
            "category": "Development"
        }));

        let workshop = validate_new_workshop(&req, Utc::now()).unwrap();
        assert_eq!(workshop.name, "API Workshop");
        assert_eq!(workshop.description, "Created via API");
        assert_eq!(workshop.category, "Development");
    }

    #[test]
    fn test_description_is_optional() {
        let req = request(json!({
            "name": "No description",
            "start_date": future(),
            "category": "Dev"
        }));

        let workshop = validate_new_workshop(&req, Utc::now()).unwrap();
        assert_eq!(workshop.description, "");
    }

    #[test]
    fn test_empty_description_is_allowed() {
        let req = request(json!({
            "name": "Empty description",
            "description": "",
            "start_date": future(),
            "category": "Dev"
        }));
        assert!(validate_new_workshop(&req, Utc::now()).is_ok());
    }

    #[test]
    fn test_name_and_category_are_trimmed() {
        let req = request(json!({
            "name": "  Padded  ",
            "start_date": future(),
            "category": "\tDev\n"
        }));

        let workshop = validate_new_workshop(&req, Utc::now()).unwrap();
        assert_eq!(workshop.name, "Padded");
        assert_eq!(workshop.category, "Dev");
    }

    #[test]
    fn test_blank_name() {
        for name in ["", "   "] {
            let req = request(json!({
                "name": name,
                "start_date": future(),
                "category": "Dev"
            }));
            let errors = validate_new_workshop(&req, Utc::now()).unwrap_err();
            assert_eq!(errors.get("name").unwrap(), &[EMPTY_NAME_MESSAGE.to_string()]);
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_blank_category() {
        let req = request(json!({
            "name": "Missing category",
            "start_date": future(),
            "category": ""
        }));
        let errors = validate_new_workshop(&req, Utc::now()).unwrap_err();
        assert_eq!(
            errors.get("category").unwrap(),
            &[EMPTY_CATEGORY_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_missing_start_date() {
        let req = request(json!({
            "name": "Missing date",
            "description": "Desc",
            "category": "Dev"
        }));
        let errors = validate_new_workshop(&req, Utc::now()).unwrap_err();
        assert_eq!(
            errors.get("start_date").unwrap(),
            &[REQUIRED_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_past_start_date() {
        let req = request(json!({
            "name": "Invalid Workshop",
            "start_date": past(),
            "category": "Development"
        }));
        let errors = validate_new_workshop(&req, Utc::now()).unwrap_err();
        assert_eq!(
            errors.get("start_date").unwrap(),
            &[PAST_START_DATE_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_start_date_equal_to_now_is_accepted() {
        let now = Utc::now();
        let value = json!(now.to_rfc3339());
        assert_eq!(
            validate_start_date(&value, now),
            Ok(FieldValue::Timestamp(now))
        );
    }

    #[test]
    fn test_malformed_start_date() {
        for value in [json!("next tuesday"), json!(12345), json!("2030-13-01T00:00:00Z")] {
            assert_eq!(
                validate_start_date(&value, Utc::now()),
                Err(DATETIME_FORMAT_MESSAGE.to_string())
            );
        }
    }

    #[test]
    fn test_errors_follow_field_table_order() {
        let req = request(json!({
            "category": "",
            "start_date": past(),
            "name": ""
        }));
        let errors = validate_new_workshop(&req, Utc::now()).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["name", "start_date", "category"]
        );
    }

    #[test]
    fn test_empty_payload_reports_all_required_fields() {
        let errors = validate_new_workshop(&request(json!({})), Utc::now()).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["name", "start_date", "category"]
        );
    }

    #[test]
    fn test_null_and_wrong_types() {
        let req = request(json!({
            "name": 42,
            "description": null,
            "start_date": future(),
            "category": ["Dev"]
        }));
        let errors = validate_new_workshop(&req, Utc::now()).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), &[NOT_A_STRING_MESSAGE.to_string()]);
        assert_eq!(errors.get("description").unwrap(), &[NULL_MESSAGE.to_string()]);
        assert_eq!(
            errors.get("category").unwrap(),
            &[NOT_A_STRING_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_length_limits() {
        let ok = "x".repeat(MAX_NAME_CHARS);
        assert!(validate_name(&json!(ok), Utc::now()).is_ok());

        let too_long = "x".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(
            validate_name(&json!(too_long), Utc::now()),
            Err("Ensure this field has no more than 255 characters.".to_string())
        );

        let too_long = "é".repeat(MAX_CATEGORY_CHARS + 1);
        assert!(validate_category(&json!(too_long), Utc::now()).is_err());
        let ok = "é".repeat(MAX_CATEGORY_CHARS);
        assert!(validate_category(&json!(ok), Utc::now()).is_ok());
    }

    #[test]
    fn test_patch_validates_only_provided_fields() {
        let patch = validate_workshop_patch(&request(json!({"name": "New Name"})), Utc::now())
            .unwrap();
        assert_eq!(patch.name.as_deref(), Some("New Name"));
        assert!(patch.description.is_none());
        assert!(patch.start_date.is_none());
        assert!(patch.category.is_none());

        let patch = validate_workshop_patch(&request(json!({})), Utc::now()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_rechecks_start_date() {
        let errors =
            validate_workshop_patch(&request(json!({"start_date": past()})), Utc::now())
                .unwrap_err();
        assert!(errors.contains("start_date"));
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let errors =
            validate_workshop_patch(&request(json!({"name": " "})), Utc::now()).unwrap_err();
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = "2030-05-01T10:30:00Z"
            .parse::<DateTime<Utc>>()
            .unwrap();

        assert_eq!(parse_timestamp("2030-05-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2030-05-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2030-05-01T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2030-05-01T10:30"), Some(expected));
        assert_eq!(parse_timestamp("2030-05-01 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2030-05-01"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_read_only_fields_are_ignored() {
        let req = request(json!({
            "id": 99,
            "created_at": "2000-01-01T00:00:00Z",
            "name": "Readable",
            "start_date": future(),
            "category": "Dev"
        }));
        assert!(validate_new_workshop(&req, Utc::now()).is_ok());
    }
}
