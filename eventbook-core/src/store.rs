//! The authoritative in-memory event collection.
//!
//! `EventStore` owns the events for one session and applies every mutation
//! synchronously. It never touches storage itself; see [`crate::session`]
//! for the load/save round trip.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::blob;
use crate::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::error::{EventBookError, EventBookResult, ValidationError};
use crate::event::{Event, NewEvent};
use crate::validate::{format_duration, is_valid_email, parse_date, parse_time};
use crate::view::ViewQuery;

/// Attempts at drawing an id that is not already in the collection.
const MAX_ID_ATTEMPTS: usize = 8;

pub struct EventStore {
    events: Vec<Event>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl EventStore {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        EventStore {
            events: Vec::new(),
            clock,
            ids,
        }
    }

    /// A store on the system clock with random UUIDs.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Replace the collection with the validated contents of a stored blob.
    pub fn load(&mut self, raw: Option<&str>) -> &[Event] {
        self.events = blob::decode(raw);
        debug!(count = self.events.len(), "Loaded events");
        &self.events
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The collection serialized for storage.
    pub fn to_blob(&self) -> EventBookResult<String> {
        blob::encode(&self.events)
    }

    pub fn view(&self, query: &ViewQuery) -> Vec<&Event> {
        query.apply(&self.events)
    }

    // EVENTS OPERATIONS:

    /// Validate and append a new event, assigning its id.
    ///
    /// Every field must be non-empty, the start must not lie before the
    /// clock's "now", and the end must come strictly after the start.
    pub fn create(&mut self, input: NewEvent) -> EventBookResult<&Event> {
        require_fields(&[
            ("Title", &input.title),
            ("Description", &input.description),
            ("Location", &input.location),
            ("Date", &input.date),
            ("Start Time", &input.start_time),
            ("End Time", &input.end_time),
        ])?;

        let window = TimeWindow::parse(&input.date, &input.start_time, &input.end_time)?;
        if window.starts_at() < self.clock.now() {
            return Err(ValidationError::StartInPast.into());
        }
        let minutes = window.minutes()?;

        let event = Event {
            id: self.fresh_id()?,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            location: input.location.trim().to_string(),
            date: window.date_string(),
            start_time: window.start_string(),
            end_time: window.end_string(),
            duration: Some(format_duration(minutes)),
            attendees: 0,
            is_favorite: false,
            registered: false,
            is_booked: None,
            created_at: None,
            updated_at: None,
            organizer_id: None,
        };

        debug!(id = %event.id, title = %event.title, "Created event");
        self.events.push(event);

        // Just pushed, so the collection is non-empty.
        Ok(&self.events[self.events.len() - 1])
    }

    /// Replace the event carrying `event.id`, keeping its position.
    ///
    /// An id that is not in the collection is a no-op. A matching
    /// replacement must have every text field filled in, a valid date and
    /// clock times, and an end after its start. Date and times are stored
    /// in their normalized form.
    pub fn update(&mut self, mut event: Event) -> EventBookResult<&[Event]> {
        let Some(index) = self.position(&event.id) else {
            debug!(id = %event.id, "Update for unknown event ignored");
            return Ok(&self.events);
        };

        require_fields(&[
            ("Title", &event.title),
            ("Description", &event.description),
            ("Location", &event.location),
            ("Date", &event.date),
            ("Start Time", &event.start_time),
            ("End Time", &event.end_time),
        ])?;

        let window = TimeWindow::parse(&event.date, &event.start_time, &event.end_time)?;
        let minutes = window.minutes()?;

        event.date = window.date_string();
        event.start_time = window.start_string();
        event.end_time = window.end_string();
        event.duration = Some(format_duration(minutes));

        debug!(id = %event.id, "Updated event");
        self.events[index] = event;
        Ok(&self.events)
    }

    /// Remove the event with `id`; an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> &[Event] {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() != before {
            debug!(id, "Deleted event");
        }
        &self.events
    }

    /// Drop every event.
    pub fn clear(&mut self) -> &[Event] {
        debug!(count = self.events.len(), "Cleared events");
        self.events.clear();
        &self.events
    }

    pub fn toggle_favorite(&mut self, id: &str) -> EventBookResult<&Event> {
        let event = self.find_mut(id)?;
        event.is_favorite = !event.is_favorite;
        debug!(id, favorite = event.is_favorite, "Toggled favorite");
        Ok(&*event)
    }

    /// Register `email` for an event.
    ///
    /// Registering again while already registered still counts another
    /// attendee.
    pub fn register(&mut self, id: &str, email: &str) -> EventBookResult<&Event> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.trim().to_string()).into());
        }

        let event = self.find_mut(id)?;
        event.attendees = event.attendees.saturating_add(1);
        event.registered = true;
        debug!(id, attendees = event.attendees, "Registered attendee");
        Ok(&*event)
    }

    /// Cancel a registration. The attendee count never drops below zero.
    pub fn cancel_registration(&mut self, id: &str) -> EventBookResult<&Event> {
        let event = self.find_mut(id)?;
        event.attendees = event.attendees.saturating_sub(1);
        event.registered = false;
        debug!(id, attendees = event.attendees, "Cancelled registration");
        Ok(&*event)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    fn find_mut(&mut self, id: &str) -> EventBookResult<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EventBookError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> EventBookResult<String> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| self.ids.generate())
            .find(|id| self.position(id).is_none())
            .ok_or_else(|| ValidationError::DuplicateId(MAX_ID_ATTEMPTS).into())
    }
}

/// A parsed date with start and end clock times on that date.
struct TimeWindow {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    fn parse(date: &str, start: &str, end: &str) -> Result<TimeWindow, ValidationError> {
        let parsed_date =
            parse_date(date).ok_or_else(|| ValidationError::InvalidDate(date.to_string()))?;
        let start_time = parse_time(start.trim()).ok_or_else(|| ValidationError::InvalidTime {
            field: "startTime",
            value: start.to_string(),
        })?;
        let end_time = parse_time(end.trim()).ok_or_else(|| ValidationError::InvalidTime {
            field: "endTime",
            value: end.to_string(),
        })?;

        Ok(TimeWindow {
            date: parsed_date,
            start: start_time,
            end: end_time,
        })
    }

    fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    /// Length in minutes; the end must come strictly after the start.
    fn minutes(&self) -> Result<i64, ValidationError> {
        let ends_at = self.date.and_time(self.end);
        if ends_at <= self.starts_at() {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok((ends_at - self.starts_at()).num_minutes())
    }

    fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    fn start_string(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    fn end_string(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

/// Fail with every blank field named.
fn require_fields(fields: &[(&'static str, &String)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
