//! ICS generation.
//!
//! Calendar records are written as RFC 5545 text through the icalendar crate,
//! which handles TEXT escaping, 75-octet folding and CRLF terminators.

mod escape;
mod generate;

pub use generate::encode_calendar;
