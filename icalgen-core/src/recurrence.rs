//! Recurrence rule checks.
//!
//! Rules are only parsed here, never expanded: the encoder writes them out as
//! given. The check is syntactic. A rule whose UNTIL falls before the event's
//! start is still a legal RRULE (it just yields no further instances), so the
//! start plays no part.

use rrule::{RRule, Unvalidated};

use crate::event::RRULE_PREFIX;

/// Check that a `recurrenceRule` value (including its `RRULE:` prefix) is a
/// well-formed RRULE. Returns the parser's message on failure.
pub fn check_recurrence_rule(rule_line: &str) -> Result<(), String> {
    let Some(rule) = rule_line.strip_prefix(RRULE_PREFIX) else {
        return Err(format!("recurrence rule must start with '{RRULE_PREFIX}'"));
    };

    rule.parse::<RRule<Unvalidated>>()
        .map(|_| ())
        .map_err(|e| format!("invalid recurrence rule '{rule_line}': {e}"))
}
