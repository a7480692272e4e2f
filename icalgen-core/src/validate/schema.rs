//! Compiled schema and the validation passes that use it.

use std::sync::OnceLock;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use tracing::{debug, warn};

use super::{ValidationIssue, ValidationResult, is_calendar_shaped};
use crate::constants::EMBEDDED_SCHEMA;
use crate::error::{IcalGenError, IcalGenResult};
use crate::input::{ALL_DAY_START_FIELD, CalendarInput, EventShape, ValidatedDocument};
use crate::recurrence::check_recurrence_rule;

const ALL_DAY_BRANCH: &str = "allDayEvent";
const TIMED_BRANCH: &str = "timedEvent";

static EMBEDDED: OnceLock<SchemaValidator> = OnceLock::new();

/// A compiled calendar schema.
///
/// Compiling is the expensive part of validation, so a validator is built
/// once and shared; validating never mutates it.
pub struct SchemaValidator {
    document: Validator,
    all_day: Option<Validator>,
    timed: Option<Validator>,
}

impl SchemaValidator {
    /// The process-wide validator for the embedded schema, compiled on first use.
    pub fn embedded() -> IcalGenResult<&'static SchemaValidator> {
        if let Some(validator) = EMBEDDED.get() {
            return Ok(validator);
        }

        let validator = SchemaValidator::from_json_str(EMBEDDED_SCHEMA)?;
        debug!("compiled embedded calendar schema");
        Ok(EMBEDDED.get_or_init(|| validator))
    }

    /// Compile a schema definition supplied as JSON text.
    pub fn from_json_str(schema: &str) -> IcalGenResult<Self> {
        let schema: Value = serde_json::from_str(schema)
            .map_err(|e| IcalGenError::Schema(format!("schema is not valid JSON: {e}")))?;
        Self::from_value(&schema)
    }

    /// Compile a schema definition.
    ///
    /// The `allDayEvent` / `timedEvent` definitions, when present, are also
    /// compiled on their own to explain `oneOf` failures.
    pub fn from_value(schema: &Value) -> IcalGenResult<Self> {
        let document = compile(schema)?;
        let branch = |name: &str| {
            schema
                .pointer(&format!("/definitions/{name}"))
                .map(compile)
                .transpose()
        };

        Ok(SchemaValidator {
            document,
            all_day: branch(ALL_DAY_BRANCH)?,
            timed: branch(TIMED_BRANCH)?,
        })
    }

    /// Validate a document, collecting every problem found.
    pub fn validate(&self, json: &Value) -> ValidationResult {
        if !is_calendar_shaped(json) {
            warn!("document is not a calendar object");
            return ValidationResult::invalid_type();
        }

        let issues = self.schema_issues(json);
        if !issues.is_empty() {
            warn!(errors = issues.len(), "document failed schema validation");
            return ValidationResult::invalid_schema(issues);
        }

        let input: CalendarInput = match serde_json::from_value(json.clone()) {
            Ok(input) => input,
            Err(e) => {
                warn!(error = %e, "document passed the schema but could not be read");
                return ValidationResult::invalid_schema(vec![ValidationIssue {
                    keyword: "type".to_string(),
                    instance_path: String::new(),
                    schema_path: "#".to_string(),
                    params: None,
                    message: e.to_string(),
                }]);
            }
        };

        let issues = semantic_issues(&input);
        if !issues.is_empty() {
            warn!(errors = issues.len(), "document failed semantic validation");
            return ValidationResult::invalid_schema(issues);
        }

        debug!(events = input.events.len(), "document is valid");
        ValidationResult::Valid(ValidatedDocument::new(input))
    }

    fn schema_issues(&self, json: &Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for error in self.document.iter_errors(json) {
            let issue = to_issue(
                error.instance_path.to_string(),
                format!("#{}", error.schema_path),
                error.to_string(),
            );
            let branch_issues = if issue.keyword == "oneOf" {
                self.branch_issues(json, &issue.instance_path)
            } else {
                Vec::new()
            };
            issues.push(issue);
            issues.extend(branch_issues);
        }

        issues
    }

    /// Errors of the branch an event was meant to match.
    ///
    /// Nothing is reported when the event carries both shapes: the `oneOf`
    /// entry already says everything.
    fn branch_issues(&self, json: &Value, event_path: &str) -> Vec<ValidationIssue> {
        let Some(event) = json.pointer(event_path).and_then(Value::as_object) else {
            return Vec::new();
        };

        let has_all_day = event.contains_key(ALL_DAY_START_FIELD);
        let has_timed = event.contains_key("start") || event.contains_key("end");
        if has_all_day && has_timed {
            return Vec::new();
        }

        let (name, validator) = if has_all_day {
            (ALL_DAY_BRANCH, &self.all_day)
        } else {
            (TIMED_BRANCH, &self.timed)
        };
        let Some(validator) = validator else {
            return Vec::new();
        };

        let event = Value::Object(event.clone());
        validator
            .iter_errors(&event)
            .map(|error| {
                to_issue(
                    format!("{event_path}{}", error.instance_path),
                    format!("#/definitions/{name}{}", error.schema_path),
                    error.to_string(),
                )
            })
            .collect()
    }
}

fn compile(schema: &Value) -> IcalGenResult<Validator> {
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(true)
        .build(schema)
        .map_err(|e| IcalGenError::Schema(e.to_string()))
}

fn to_issue(instance_path: String, schema_path: String, message: String) -> ValidationIssue {
    let keyword = schema_path
        .rsplit('/')
        .next()
        .filter(|k| !k.is_empty() && *k != "#")
        .unwrap_or("schema")
        .to_string();

    ValidationIssue {
        keyword,
        instance_path,
        schema_path,
        params: None,
        message,
    }
}

/// Checks on the typed document that JSON Schema cannot express.
fn semantic_issues(input: &CalendarInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (i, event) in input.events.iter().enumerate() {
        if let Some(ref rule) = event.recurrence_rule {
            if let Err(message) = check_recurrence_rule(rule) {
                issues.push(ValidationIssue {
                    keyword: "recurrenceRule".to_string(),
                    instance_path: format!("/events/{i}/recurrenceRule"),
                    schema_path: "#/definitions/event/properties/recurrenceRule".to_string(),
                    params: None,
                    message,
                });
            }
        }

        if let EventShape::Timed { start, end } = &event.shape {
            if end < start {
                issues.push(ValidationIssue {
                    keyword: "timeRange".to_string(),
                    instance_path: format!("/events/{i}/end"),
                    schema_path: "#/definitions/timedEvent".to_string(),
                    params: None,
                    message: format!("end {end} is before start {start}"),
                });
            }
        }
    }

    issues
}
