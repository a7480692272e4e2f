//! Process-wide constants for generated calendars.

/// PRODID written into every generated calendar.
pub const PRODUCT_ID: &str = "-//icalgen//icalgen-core//EN";

/// CALSCALE written into every generated calendar.
pub const CALENDAR_SCALE: &str = "GREGORIAN";

/// iCalendar specification version (RFC 5545 §3.7.4).
pub const ICS_VERSION: &str = "2.0";

/// Schema definition compiled by default when no alternate schema is supplied.
pub const EMBEDDED_SCHEMA: &str = include_str!("../schema/icalgen-schema.json");
