//! ICS calendar generation.

use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};
use tracing::debug;

use super::escape::{clean_text, escape_text};
use crate::calendar::CalendarRecord;
use crate::constants::ICS_VERSION;
use crate::error::{IcalGenError, IcalGenResult};
use crate::event::{EventRecord, EventTime, EventTiming};

const DATE_FORMAT: &str = "%Y%m%d";
const UTC_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const MAX_LINE_OCTETS: usize = 75;

/// Encode a calendar record as RFC 5545 text.
///
/// Encoding is deterministic: the same record always yields the same bytes.
/// Within an event, properties come out in name order followed by the
/// repeatable ones (CATEGORIES, EXDATE, RDATE), each in record order.
pub fn encode_calendar(calendar: &CalendarRecord) -> IcalGenResult<String> {
    // Built from empty so the crate's own PRODID never appears
    let mut cal = Calendar::empty();
    cal.append_property(("VERSION", ICS_VERSION));
    cal.append_property(("PRODID", calendar.product_id));
    cal.append_property(("CALSCALE", calendar.scale));

    // NAME is RFC 7986 and untyped in the crate, so it is escaped here.
    // X-WR-CALNAME is what most clients still read.
    cal.append_property(Property::new("NAME", escape_text(&calendar.name)));
    cal.append_property(Property::new("X-WR-CALNAME", clean_text(&calendar.name)));

    if let Some(ref desc) = calendar.description {
        cal.description(&clean_text(desc));
    }

    for event in &calendar.events {
        cal.push(to_ics_event(event)?);
    }

    let ics = split_overlong_lines(&cal.done().to_string());

    debug!(
        events = calendar.events.len(),
        octets = ics.len(),
        "encoded calendar"
    );

    Ok(ics)
}

fn to_ics_event(event: &EventRecord) -> IcalGenResult<icalendar::Event> {
    let mut ics_event = icalendar::Event::new();

    ics_event.uid(&event.uid.to_string());
    ics_event.add_property("DTSTAMP", format_utc(&event.stamp));

    match &event.timing {
        EventTiming::AllDay { date } => {
            ics_event.append_property(date_property("DTSTART", date));
        }
        EventTiming::Timed { start, end } => {
            if end < start {
                return Err(IcalGenError::IcsGenerate(format!(
                    "event {} ends before it starts",
                    event.uid
                )));
            }
            ics_event.add_property("DTSTART", format_utc(start));
            ics_event.add_property("DTEND", format_utc(end));
        }
    }

    // Recurrence sets are encoded as given, never expanded
    if let Some(ref rule) = event.recurrence_rule {
        if rule.is_empty() || rule.chars().any(char::is_control) {
            return Err(IcalGenError::IcsGenerate(format!(
                "event {} has an unencodable recurrence rule {:?}",
                event.uid, rule
            )));
        }
        ics_event.add_property("RRULE", rule);
    }
    for rdate in &event.recurrence_dates {
        ics_event.append_multi_property(time_property("RDATE", rdate));
    }
    for exdate in &event.exception_dates {
        ics_event.append_multi_property(time_property("EXDATE", exdate));
    }

    ics_event.summary(&clean_text(&event.summary));

    if let Some(ref desc) = event.description {
        ics_event.description(&clean_text(desc));
    }

    if let Some(ref loc) = event.location {
        ics_event.location(&clean_text(loc));
    }

    // The crate escapes the whole CATEGORIES value, commas included, so
    // each category gets its own property
    for category in &event.categories {
        ics_event.append_multi_property(Property::new("CATEGORIES", clean_text(category)));
    }

    ics_event.add_property("CLASS", event.classification.as_ics_str());
    ics_event.add_property("TRANSP", event.transparency.as_ics_str());

    Ok(ics_event.done())
}

/// Re-fold any physical line longer than 75 octets.
///
/// icalendar leaves a 76-octet continuation line when exactly 75 octets
/// remain after a fold.
fn split_overlong_lines(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        let mut rest = line;
        while rest.len() > MAX_LINE_OCTETS {
            let mut cut = MAX_LINE_OCTETS;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            result.push_str(&rest[..cut]);
            result.push_str("\r\n ");
            rest = &rest[cut..];
        }
        result.push_str(rest);
        result.push_str("\r\n");
    }

    result
}

fn date_property(name: &str, date: &NaiveDate) -> Property {
    let mut prop = Property::new(name, date.format(DATE_FORMAT).to_string());
    prop.append_parameter(ValueType::Date);
    prop
}

fn time_property(name: &str, time: &EventTime) -> Property {
    match time {
        EventTime::Date(d) => date_property(name, d),
        EventTime::DateTimeUtc(dt) => Property::new(name, format_utc(dt)),
    }
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(UTC_DATE_TIME_FORMAT).to_string()
}
