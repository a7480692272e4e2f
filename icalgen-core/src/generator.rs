//! JSON in, iCalendar text out.

use serde_json::Value;
use tracing::{debug, info};

use crate::calendar::{CalendarBuilder, Clock, IdSource, RandomIds, SystemClock};
use crate::error::IcalGenResult;
use crate::ics::encode_calendar;
use crate::validate::{SchemaValidator, ValidationFailure, ValidationResult};

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// The encoded `.ics` document
    Calendar(String),
    /// The source was rejected; nothing was built
    Invalid(ValidationFailure),
}

impl Generated {
    pub fn calendar(&self) -> Option<&str> {
        match self {
            Generated::Calendar(ics) => Some(ics),
            Generated::Invalid(_) => None,
        }
    }
}

/// Runs validation, building and encoding in order.
pub struct Generator<'a, C = SystemClock, I = RandomIds> {
    schema: &'a SchemaValidator,
    builder: CalendarBuilder<C, I>,
}

impl Generator<'static> {
    /// A generator using the embedded schema, the wall clock and random UIDs.
    pub fn system() -> IcalGenResult<Self> {
        Generator::new(CalendarBuilder::new())
    }
}

impl<C: Clock, I: IdSource> Generator<'static, C, I> {
    pub fn new(builder: CalendarBuilder<C, I>) -> IcalGenResult<Self> {
        Ok(Generator {
            schema: SchemaValidator::embedded()?,
            builder,
        })
    }
}

impl<'a, C: Clock, I: IdSource> Generator<'a, C, I> {
    pub fn with_schema(schema: &'a SchemaValidator, builder: CalendarBuilder<C, I>) -> Self {
        Generator { schema, builder }
    }

    /// Validate `json` and, if it is valid, build and encode the calendar.
    ///
    /// A rejected document is returned as [`Generated::Invalid`]; errors are
    /// reserved for failures past validation.
    pub fn generate(&self, json: &Value) -> IcalGenResult<Generated> {
        let document = match self.schema.validate(json) {
            ValidationResult::Valid(document) => document,
            ValidationResult::Invalid(failure) => {
                debug!(errors = failure.errors.len(), "skipping generation");
                return Ok(Generated::Invalid(failure));
            }
        };

        let record = self.builder.build(&document)?;
        let ics = encode_calendar(&record)?;

        info!(
            calendar = %record.name,
            events = record.events.len(),
            "generated calendar"
        );

        Ok(Generated::Calendar(ics))
    }
}
