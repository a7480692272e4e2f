//! Calendar records and the builder that assembles them.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::constants::{CALENDAR_SCALE, PRODUCT_ID};
use crate::error::{IcalGenError, IcalGenResult};
use crate::event::EventRecord;
use crate::input::ValidatedDocument;

/// A calendar ready for encoding
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRecord {
    pub name: String,
    pub description: Option<String>,
    pub product_id: &'static str,
    pub scale: &'static str,
    pub events: Vec<EventRecord>,
}

/// Source of the generation timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of event identifiers.
pub trait IdSource {
    fn next_id(&self) -> Uuid;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random (v4) UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Builds [`CalendarRecord`]s from validated documents.
#[derive(Debug, Clone, Default)]
pub struct CalendarBuilder<C = SystemClock, I = RandomIds> {
    clock: C,
    ids: I,
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock, I: IdSource> CalendarBuilder<C, I> {
    pub fn with_sources(clock: C, ids: I) -> Self {
        CalendarBuilder { clock, ids }
    }

    /// Assemble the calendar record.
    ///
    /// Every event shares one DTSTAMP (RFC 5545 §3.8.7.2: the creation time
    /// of the calendar object) and gets a fresh UID. Event order is kept.
    pub fn build(&self, document: &ValidatedDocument) -> IcalGenResult<CalendarRecord> {
        let input = document.input();
        if input.events.is_empty() {
            return Err(IcalGenError::Contract(
                "calendar input must contain at least one event".into(),
            ));
        }

        let stamp = self.clock.now().trunc_subsecs(0);

        let events: Vec<EventRecord> = input
            .events
            .iter()
            .map(|event| EventRecord::map(event, self.ids.next_id(), stamp))
            .collect();

        debug!(
            calendar = %input.name,
            events = events.len(),
            stamp = %stamp,
            "built calendar record"
        );

        Ok(CalendarRecord {
            name: input.name.clone(),
            description: input.description.clone().filter(|d| !d.is_empty()),
            product_id: PRODUCT_ID,
            scale: CALENDAR_SCALE,
            events,
        })
    }
}
