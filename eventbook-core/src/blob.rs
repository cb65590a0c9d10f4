//! Reading and writing the serialized event collection.
//!
//! The whole collection lives under one storage key as a JSON array. A
//! missing, empty, or corrupted blob reads as an empty collection, and each
//! array element is validated on its own: bad records are dropped, good
//! ones keep their relative order.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::error::{EventBookError, EventBookResult};
use crate::event::Event;

/// Parse a stored blob into validated, normalized events.
pub fn decode(raw: Option<&str>) -> Vec<Event> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Vec::new();
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored events are not valid JSON, starting empty: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(items) = parsed else {
        warn!("Stored events are not a JSON array, starting empty");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match Event::from_value(item) {
            Ok(event) if !seen.insert(event.id.clone()) => {
                warn!(index, id = %event.id, "Dropping stored event with duplicate id");
            }
            Ok(event) => events.push(event),
            Err(reason) => {
                warn!(index, "Dropping invalid stored event: {}", reason);
            }
        }
    }

    events
}

/// Serialize the collection for storage.
pub fn encode(events: &[Event]) -> EventBookResult<String> {
    serde_json::to_string(events).map_err(|e| EventBookError::Serialization(e.to_string()))
}
