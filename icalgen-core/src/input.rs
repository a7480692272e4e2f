//! Typed view of a validated calendar document.
//!
//! The JSON source distinguishes all-day and timed events purely by which
//! fields are present. Once the document has passed schema validation it is
//! deserialized into these types, where that distinction becomes the
//! [`EventShape`] sum type.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;

/// A calendar document as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub events: Vec<EventInput>,
}

/// One event of the source document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Full content line, including the `RRULE:` prefix.
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub recurrence_dates: Option<Vec<DateOrDateTime>>,
    #[serde(default)]
    pub exception_dates: Option<Vec<DateOrDateTime>>,
    #[serde(flatten)]
    pub shape: EventShape,
}

/// The two mutually exclusive event shapes.
///
/// Variant order matters for untagged deserialization: the all-day shape is
/// tried first, matching the "has `allDayStart`" discriminant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EventShape {
    AllDay {
        #[serde(rename = "allDayStart")]
        all_day_start: NaiveDate,
    },
    Timed {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
}

/// An entry of `recurrenceDates` / `exceptionDates`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateOrDateTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

/// Field that marks an event as all-day. Shared by the validator's branch
/// selection and the event mapper.
pub const ALL_DAY_START_FIELD: &str = "allDayStart";

/// A calendar document that has passed validation.
///
/// Only [`crate::validate`] constructs this, so holding one proves the
/// schema accepted the source JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDocument(CalendarInput);

impl ValidatedDocument {
    pub(crate) fn new(input: CalendarInput) -> Self {
        ValidatedDocument(input)
    }

    pub fn input(&self) -> &CalendarInput {
        &self.0
    }

    pub fn into_input(self) -> CalendarInput {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_day_event_deserializes_to_all_day_shape() {
        let event: EventInput = serde_json::from_value(json!({
            "allDayStart": "2026-02-24",
            "summary": "All-Day Test Event",
        }))
        .unwrap();

        assert_eq!(
            event.shape,
            EventShape::AllDay {
                all_day_start: NaiveDate::from_ymd_opt(2026, 2, 24).unwrap()
            }
        );
        assert!(event.description.is_none());
    }

    #[test]
    fn test_timed_event_keeps_offset() {
        let event: EventInput = serde_json::from_value(json!({
            "start": "2026-02-24T10:00:00-04:00",
            "end": "2026-02-24T11:00:00-04:00",
            "summary": "Test Event",
        }))
        .unwrap();

        match event.shape {
            EventShape::Timed { start, end } => {
                assert_eq!(start.offset().local_minus_utc(), -4 * 3600);
                assert_eq!(start.to_rfc3339(), "2026-02-24T10:00:00-04:00");
                assert_eq!(end.to_rfc3339(), "2026-02-24T11:00:00-04:00");
            }
            other => panic!("expected timed shape, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_fields_and_extra_properties() {
        let event: EventInput = serde_json::from_value(json!({
            "id": "48e92d47-bdb0-4b01-8283-72bca4c34878",
            "allDayStart": "2025-03-15",
            "summary": "Sample Event",
            "categories": ["US FEDERAL HOLIDAY", "HOLIDAY"],
            "recurrenceRule": "RRULE:FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15;COUNT=5",
            "recurrenceDates": ["2025-03-25", "2025-04-25T10:00:00Z"],
            "exceptionDates": ["2025-03-15"],
        }))
        .unwrap();

        assert_eq!(
            event.categories.as_deref(),
            Some(&["US FEDERAL HOLIDAY".to_string(), "HOLIDAY".to_string()][..])
        );
        let rdates = event.recurrence_dates.unwrap();
        assert!(matches!(rdates[0], DateOrDateTime::Date(_)));
        assert!(matches!(rdates[1], DateOrDateTime::DateTime(_)));
        assert_eq!(event.exception_dates.map(|d| d.len()), Some(1));
    }
}
