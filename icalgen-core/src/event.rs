//! Internal event records.
//!
//! An [`EventRecord`] is what the encoder consumes: identity and timestamp are
//! already fixed, timing is a closed sum type, and absent optional fields are
//! simply not there.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::input::{DateOrDateTime, EventInput, EventShape};

/// A calendar event ready for encoding
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub uid: Uuid,
    /// DTSTAMP, whole seconds, shared by every event of one calendar
    pub stamp: DateTime<Utc>,
    pub classification: Classification,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Category names in source order, one CATEGORIES property each
    pub categories: Vec<String>,
    /// RRULE value without the `RRULE:` prefix
    pub recurrence_rule: Option<String>,
    pub recurrence_dates: Vec<EventTime>,
    pub exception_dates: Vec<EventTime>,
    pub timing: EventTiming,
    pub transparency: Transparency,
}

/// When an event happens
#[derive(Debug, Clone, PartialEq)]
pub enum EventTiming {
    AllDay { date: NaiveDate },
    Timed { start: DateTime<Utc>, end: DateTime<Utc> },
}

/// A single date or UTC instant, used for RDATE/EXDATE values
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
}

/// Event transparency (busy/free status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// Event blocks time on calendar
    Opaque,
    /// Event does not block time (shows as free)
    Transparent,
}

impl Transparency {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            Transparency::Opaque => "OPAQUE",
            Transparency::Transparent => "TRANSPARENT",
        }
    }
}

/// Access classification (CLASS). Generated events are always public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Public,
}

impl Classification {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            Classification::Public => "PUBLIC",
        }
    }
}

/// Prefix carried by `recurrenceRule` values in the source document.
pub const RRULE_PREFIX: &str = "RRULE:";

impl EventRecord {
    /// Map one source event into a record.
    ///
    /// All-day events carry only their date and are transparent; timed events
    /// carry start and end and are opaque.
    pub fn map(input: &EventInput, uid: Uuid, stamp: DateTime<Utc>) -> Self {
        let (timing, transparency) = match &input.shape {
            EventShape::AllDay { all_day_start } => (
                EventTiming::AllDay {
                    date: *all_day_start,
                },
                Transparency::Transparent,
            ),
            EventShape::Timed { start, end } => (
                EventTiming::Timed {
                    start: start.with_timezone(&Utc),
                    end: end.with_timezone(&Utc),
                },
                Transparency::Opaque,
            ),
        };

        EventRecord {
            uid,
            stamp,
            classification: Classification::Public,
            summary: input.summary.clone(),
            description: non_empty(&input.description),
            location: non_empty(&input.location),
            categories: input.categories.clone().unwrap_or_default(),
            recurrence_rule: input
                .recurrence_rule
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(|r| r.strip_prefix(RRULE_PREFIX).unwrap_or(r).to_string()),
            recurrence_dates: to_event_times(&input.recurrence_dates),
            exception_dates: to_event_times(&input.exception_dates),
            timing,
            transparency,
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.timing, EventTiming::AllDay { .. })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn to_event_times(values: &Option<Vec<DateOrDateTime>>) -> Vec<EventTime> {
    values
        .iter()
        .flatten()
        .map(|v| match v {
            DateOrDateTime::Date(d) => EventTime::Date(*d),
            DateOrDateTime::DateTime(dt) => EventTime::DateTimeUtc(dt.with_timezone(&Utc)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn map_json(value: serde_json::Value) -> EventRecord {
        let input: EventInput = serde_json::from_value(value).unwrap();
        EventRecord::map(&input, Uuid::nil(), fixed_stamp())
    }

    #[test]
    fn test_all_day_event_is_transparent_without_end() {
        let record = map_json(json!({
            "allDayStart": "2026-02-24",
            "summary": "All-Day Test Event",
        }));

        assert_eq!(
            record.timing,
            EventTiming::AllDay {
                date: NaiveDate::from_ymd_opt(2026, 2, 24).unwrap()
            }
        );
        assert_eq!(record.transparency, Transparency::Transparent);
        assert_eq!(record.classification, Classification::Public);
        assert!(record.is_all_day());
    }

    #[test]
    fn test_timed_event_is_opaque_and_normalized_to_utc() {
        let record = map_json(json!({
            "start": "2026-02-24T10:00:00-04:00",
            "end": "2026-02-24T11:00:00-04:00",
            "summary": "Test Event",
        }));

        assert_eq!(
            record.timing,
            EventTiming::Timed {
                start: Utc.with_ymd_and_hms(2026, 2, 24, 14, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2026, 2, 24, 15, 0, 0).unwrap(),
            }
        );
        assert_eq!(record.transparency, Transparency::Opaque);
        assert!(!record.is_all_day());
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let record = map_json(json!({
            "allDayStart": "2026-02-24",
            "summary": "Sparse",
            "description": "",
            "location": "",
            "categories": [],
        }));

        assert!(record.description.is_none());
        assert!(record.location.is_none());
        assert!(record.categories.is_empty());
        assert!(record.recurrence_rule.is_none());
        assert!(record.recurrence_dates.is_empty());
        assert!(record.exception_dates.is_empty());
    }

    #[test]
    fn test_categories_keep_order_and_duplicates() {
        let record = map_json(json!({
            "allDayStart": "2026-01-01",
            "summary": "New Year's Day",
            "categories": ["HOLIDAY", "US FEDERAL HOLIDAY", "HOLIDAY"],
        }));

        assert_eq!(
            record.categories,
            vec!["HOLIDAY", "US FEDERAL HOLIDAY", "HOLIDAY"]
        );
    }

    #[test]
    fn test_recurrence_fields_are_carried() {
        let record = map_json(json!({
            "allDayStart": "2025-01-15",
            "summary": "First Day",
            "recurrenceRule": "RRULE:FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15;COUNT=10",
            "recurrenceDates": ["2025-03-25", "2025-04-25T12:30:00+02:00"],
            "exceptionDates": ["2025-03-15"],
        }));

        assert_eq!(
            record.recurrence_rule.as_deref(),
            Some("FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15;COUNT=10")
        );
        assert_eq!(
            record.recurrence_dates,
            vec![
                EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 25).unwrap()),
                EventTime::DateTimeUtc(Utc.with_ymd_and_hms(2025, 4, 25, 10, 30, 0).unwrap()),
            ]
        );
        assert_eq!(
            record.exception_dates,
            vec![EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())]
        );
    }
}
