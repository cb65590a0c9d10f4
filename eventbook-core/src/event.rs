//! The bookable event record.
//!
//! Field names on the wire match the stored JSON exactly (camelCase), so a
//! blob written by an earlier session reads back without translation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{format_duration, is_valid_date, is_valid_time, minutes_of_day, parse_date};

/// A bookable event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned at creation, never changed afterwards
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    /// 24-hour `HH:MM`
    pub start_time: String,
    /// 24-hour `HH:MM`
    pub end_time: String,
    /// Cached `end_time - start_time`, e.g. "1h 30m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    // Attendance state
    #[serde(default)]
    pub attendees: u64,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub registered: bool,

    // Carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_booked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<String>,
}

/// Input for creating an event. The id is assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

const REQUIRED_STRINGS: [&str; 7] = [
    "id",
    "title",
    "description",
    "location",
    "date",
    "startTime",
    "endTime",
];

impl Event {
    /// Validate and normalize one element of a stored JSON array.
    ///
    /// Structural problems reject the whole record; attendance fields of the
    /// wrong type fall back to their defaults instead.
    pub fn from_value(value: &Value) -> Result<Event, String> {
        let obj = value.as_object().ok_or("not an object")?;

        for field in REQUIRED_STRINGS {
            if !obj.get(field).is_some_and(Value::is_string) {
                return Err(format!("'{}' is missing or not a string", field));
            }
        }

        let text = |field: &str| {
            obj.get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let date = text("date");
        if !is_valid_date(&date) {
            return Err(format!("unparsable date '{}'", date));
        }
        let start_time = text("startTime");
        if !is_valid_time(&start_time) {
            return Err(format!("malformed startTime '{}'", start_time));
        }
        let end_time = text("endTime");
        if !is_valid_time(&end_time) {
            return Err(format!("malformed endTime '{}'", end_time));
        }

        let flag = |field: &str| obj.get(field).and_then(Value::as_bool).unwrap_or(false);
        let optional = |field: &str| obj.get(field).and_then(Value::as_str).map(String::from);

        let mut event = Event {
            id: text("id"),
            title: text("title"),
            description: text("description"),
            location: text("location"),
            date,
            start_time,
            end_time,
            duration: None,
            attendees: obj.get("attendees").map(normalize_attendees).unwrap_or(0),
            is_favorite: flag("isFavorite"),
            registered: flag("registered"),
            is_booked: obj.get("isBooked").and_then(Value::as_bool),
            created_at: optional("createdAt"),
            updated_at: optional("updatedAt"),
            organizer_id: optional("organizerId"),
        };
        event.refresh_duration();

        Ok(event)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// `end_time - start_time` in minutes on a 24-hour clock, ignoring day
    /// rollover. An unparsable time counts as midnight.
    pub fn duration_minutes(&self) -> i64 {
        let start = minutes_of_day(&self.start_time).unwrap_or(0);
        let end = minutes_of_day(&self.end_time).unwrap_or(0);
        end - start
    }

    /// Recompute the cached `duration` string from the two clock times.
    pub fn refresh_duration(&mut self) {
        self.duration = match (is_valid_time(&self.start_time), is_valid_time(&self.end_time)) {
            (true, true) if self.duration_minutes() > 0 => {
                Some(format_duration(self.duration_minutes()))
            }
            _ => None,
        };
    }

    /// Case-insensitive match against title, description and location.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.title, &self.description, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Non-numeric or negative counts become 0; fractional counts are truncated.
fn normalize_attendees(value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
