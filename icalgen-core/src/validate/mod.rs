//! Validation of untrusted calendar documents.
//!
//! Validation runs in three steps:
//! 1. a shape guard that rejects anything that is not an object with `name`
//!    and an array `events`, before any schema work is done;
//! 2. JSON Schema validation collecting every error (not fail-fast);
//! 3. checks the schema cannot express: recurrence rule syntax and
//!    timed events that end before they start.
//!
//! A failed validation is a value, never an error.
//!
//! # `oneOf` diagnostics
//!
//! An event must match exactly one of the all-day and timed shapes. The schema
//! engine reports a single `oneOf` entry at the event's path when that fails.
//! If the event carries the fields of at most one shape, the errors of the
//! branch picked by the same discriminant the event mapper uses
//! (`allDayStart` present or not) are reported as well, rebased onto the
//! event's path. Errors of the other branch are never reported, so callers do
//! not see "missing `allDayStart`" for an event that was meant to be timed.

mod schema;

use serde::Serialize;
use serde_json::{Value, json};

pub use schema::SchemaValidator;

use crate::error::IcalGenResult;
use crate::input::ValidatedDocument;

/// Message for input that fails the shape guard.
pub const INVALID_TYPE_MESSAGE: &str = "Provided JSON data is not a valid CalendarInput object.";

/// Message for input that fails schema or semantic validation.
pub const INVALID_SCHEMA_MESSAGE: &str =
    "Provided JSON data failed schema validation. See 'errors' for details.";

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Rule that failed, e.g. `required`, `format`, `oneOf`
    pub keyword: String,
    /// JSON pointer into the document, e.g. `/events/0`
    pub instance_path: String,
    /// Pointer into the schema, `#`-prefixed
    pub schema_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub message: String,
}

impl ValidationIssue {
    /// The issue reported by the shape guard.
    pub fn invalid_type() -> Self {
        ValidationIssue {
            keyword: "type".to_string(),
            instance_path: "$".to_string(),
            schema_path: "$".to_string(),
            params: Some(json!({ "type": "CalendarInput" })),
            message: INVALID_TYPE_MESSAGE.to_string(),
        }
    }
}

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub message: String,
    pub errors: Vec<ValidationIssue>,
}

/// Outcome of validating a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(ValidatedDocument),
    Invalid(ValidationFailure),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub(crate) fn invalid_type() -> Self {
        ValidationResult::Invalid(ValidationFailure {
            message: INVALID_TYPE_MESSAGE.to_string(),
            errors: vec![ValidationIssue::invalid_type()],
        })
    }

    pub(crate) fn invalid_schema(errors: Vec<ValidationIssue>) -> Self {
        ValidationResult::Invalid(ValidationFailure {
            message: INVALID_SCHEMA_MESSAGE.to_string(),
            errors,
        })
    }
}

/// Validate a document against the embedded schema.
///
/// The outer `Err` is reserved for an embedded schema that fails to compile,
/// which is a defect in this crate rather than a problem with `json`.
pub fn validate_document(json: &Value) -> IcalGenResult<ValidationResult> {
    Ok(SchemaValidator::embedded()?.validate(json))
}

/// Shape guard: an object with a `name` and an array `events`.
pub(crate) fn is_calendar_shaped(json: &Value) -> bool {
    json.as_object().is_some_and(|obj| {
        obj.contains_key("name") && obj.get("events").is_some_and(Value::is_array)
    })
}
