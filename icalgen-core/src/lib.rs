//! Core of the icalgen tool: JSON calendar descriptions to RFC 5545 text.
//!
//! The pipeline is three pure steps:
//! - [`validate_document`] checks untrusted JSON and yields a [`ValidatedDocument`]
//! - [`build_calendar`] turns that into a [`CalendarRecord`] with UIDs and a DTSTAMP
//! - [`encode_calendar`] writes the record as `.ics` text
//!
//! [`Generator`] runs all three. No I/O happens in this crate.

pub mod calendar;
pub mod constants;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod input;
pub mod recurrence;
pub mod validate;

pub use calendar::{CalendarBuilder, CalendarRecord, Clock, IdSource, RandomIds, SystemClock};
pub use error::{IcalGenError, IcalGenResult};
pub use event::{Classification, EventRecord, EventTime, EventTiming, Transparency};
pub use generator::{Generated, Generator};
pub use ics::encode_calendar;
pub use input::{CalendarInput, DateOrDateTime, EventInput, EventShape, ValidatedDocument};
pub use validate::{
    SchemaValidator, ValidationFailure, ValidationIssue, ValidationResult, validate_document,
};

/// Build a calendar record using the wall clock and random UIDs.
pub fn build_calendar(document: &ValidatedDocument) -> IcalGenResult<CalendarRecord> {
    CalendarBuilder::new().build(document)
}
