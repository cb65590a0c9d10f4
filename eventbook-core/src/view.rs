//! Derived views over the collection: filtering, search and sorting.
//!
//! Nothing here mutates the stored events; every function hands back a
//! new ordering or selection of references into the collection.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Which slice of the collection to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    /// Favorited events
    Saved,
    Registered,
}

impl ViewMode {
    pub fn includes(self, event: &Event) -> bool {
        match self {
            ViewMode::All => true,
            ViewMode::Saved => event.is_favorite,
            ViewMode::Registered => event.registered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Picking the active key flips the direction; picking another key
    /// starts it ascending.
    pub fn select(self, key: SortKey) -> SortState {
        if key == self.key {
            SortState {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            SortState {
                key,
                direction: SortDirection::Asc,
            }
        }
    }

    /// Order two events under this state.
    ///
    /// By date, events whose date does not parse go last in either
    /// direction. By duration, `end - start` minutes on a 24-hour clock.
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self.key {
            SortKey::Date => match (a.parsed_date(), b.parsed_date()) {
                (Some(x), Some(y)) => self.direction.apply(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Duration => self
                .direction
                .apply(a.duration_minutes().cmp(&b.duration_minutes())),
        }
    }
}

/// Stable sort in place; equal keys keep their input order.
pub fn sort_events<E: Borrow<Event>>(events: &mut [E], state: SortState) {
    events.sort_by(|a, b| state.compare(a.borrow(), b.borrow()));
}

/// The events `mode` shows, in collection order.
pub fn filter(events: &[Event], mode: ViewMode) -> Vec<&Event> {
    events.iter().filter(|e| mode.includes(e)).collect()
}

/// Everything a presentation layer needs to derive one list.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub mode: ViewMode,
    pub search: Option<String>,
    pub sort: Option<SortState>,
}

impl ViewQuery {
    /// Filter by mode, then search text, then sort if a sort is active.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let query = self.search.as_deref().map(str::trim).unwrap_or("");

        let mut selected = filter(events, self.mode);
        if !query.is_empty() {
            selected.retain(|e| e.matches(query));
        }

        if let Some(state) = self.sort {
            sort_events(&mut selected, state);
        }

        selected
    }
}

// =============================================================================
// Parsing and display (used for CLI arguments and labels)
// =============================================================================

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ViewMode::All),
            "saved" | "favorites" => Ok(ViewMode::Saved),
            "registered" => Ok(ViewMode::Registered),
            _ => Err(format!("Unknown view '{}'. Expected all, saved or registered", s)),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "duration" => Ok(SortKey::Duration),
            _ => Err(format!("Unknown sort key '{}'. Expected date or duration", s)),
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Date => "Date",
            SortKey::Duration => "Duration",
        };
        let arrow = match self.direction {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        };
        write!(f, "Sort: {} {}", key, arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, date: &str, start: &str, end: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            description: "desc".to_string(),
            location: "Hall".to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            duration: None,
            attendees: 0,
            is_favorite: false,
            registered: false,
            is_booked: None,
            created_at: None,
            updated_at: None,
            organizer_id: None,
        }
    }

    fn ids<E: Borrow<Event>>(events: &[E]) -> Vec<&str> {
        events.iter().map(|e| e.borrow().id.as_str()).collect()
    }

    #[test]
    fn duration_sort_toggles() {
        let events = vec![
            event("30", "2099-01-01", "09:00", "09:30"),
            event("90", "2099-01-01", "09:00", "10:30"),
            event("15", "2099-01-01", "09:00", "09:15"),
        ];

        let state = SortState::default().select(SortKey::Duration);
        assert_eq!(state.direction, SortDirection::Asc);
        let mut view: Vec<&Event> = events.iter().collect();
        sort_events(&mut view, state);
        assert_eq!(ids(&view), vec!["15", "30", "90"]);

        let state = state.select(SortKey::Duration);
        sort_events(&mut view, state);
        assert_eq!(ids(&view), vec!["90", "30", "15"]);
    }

    #[test]
    fn date_sort_reverses_and_keeps_bad_dates_last() {
        let events = vec![
            event("b", "2099-02-01", "09:00", "10:00"),
            event("x", "someday", "09:00", "10:00"),
            event("a", "2099-01-01", "09:00", "10:00"),
            event("c", "2099-03-01", "09:00", "10:00"),
        ];

        let asc = SortState::default();
        let mut view: Vec<&Event> = events.iter().collect();
        sort_events(&mut view, asc);
        assert_eq!(ids(&view), vec!["a", "b", "c", "x"]);

        let desc = asc.select(SortKey::Date);
        sort_events(&mut view, desc);
        assert_eq!(ids(&view), vec!["c", "b", "a", "x"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut events = vec![
            event("first", "2099-01-01", "09:00", "10:00"),
            event("second", "2099-01-01", "11:00", "12:00"),
            event("third", "2099-01-01", "08:00", "09:00"),
        ];
        sort_events(&mut events, SortState::default());
        assert_eq!(ids(&events), vec!["first", "second", "third"]);

        let desc = SortState {
            key: SortKey::Duration,
            direction: SortDirection::Desc,
        };
        sort_events(&mut events, desc);
        assert_eq!(ids(&events), vec!["first", "second", "third"]);
    }

    #[test]
    fn select_rules() {
        let start = SortState::default();
        assert_eq!(start.select(SortKey::Date).select(SortKey::Date), start);

        let desc_date = start.select(SortKey::Date);
        assert_eq!(desc_date.direction, SortDirection::Desc);
        let switched = desc_date.select(SortKey::Duration);
        assert_eq!(
            switched,
            SortState {
                key: SortKey::Duration,
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn filter_modes() {
        let mut events = vec![
            event("plain", "2099-01-01", "09:00", "10:00"),
            event("fav", "2099-01-01", "09:00", "10:00"),
            event("reg", "2099-01-01", "09:00", "10:00"),
        ];
        events[1].is_favorite = true;
        events[2].registered = true;

        assert_eq!(filter(&events, ViewMode::All).len(), 3);
        assert_eq!(ids(&filter(&events, ViewMode::Saved)), vec!["fav"]);
        assert_eq!(ids(&filter(&events, ViewMode::Registered)), vec!["reg"]);

        let registered = ViewQuery {
            mode: ViewMode::Registered,
            ..ViewQuery::default()
        };
        assert_eq!(ids(&registered.apply(&events)), vec!["reg"]);
    }

    #[test]
    fn query_combines_mode_search_and_sort() {
        let mut events = vec![
            event("late", "2099-06-01", "09:00", "10:00"),
            event("early", "2099-01-01", "09:00", "10:00"),
            event("other", "2099-03-01", "09:00", "10:00"),
        ];
        events[0].location = "Main Stage".to_string();
        events[1].location = "main stage".to_string();
        events.iter_mut().for_each(|e| e.is_favorite = true);
        events[2].is_favorite = false;

        let query = ViewQuery {
            mode: ViewMode::Saved,
            search: Some("  MAIN ".to_string()),
            sort: Some(SortState::default()),
        };
        assert_eq!(ids(&query.apply(&events)), vec!["early", "late"]);

        let unsorted = ViewQuery::default();
        assert_eq!(ids(&unsorted.apply(&events)), vec!["late", "early", "other"]);
    }

    #[test]
    fn parses_cli_words() {
        assert_eq!("Saved".parse::<ViewMode>(), Ok(ViewMode::Saved));
        assert_eq!("duration".parse::<SortKey>(), Ok(SortKey::Duration));
        assert!("size".parse::<SortKey>().is_err());
        assert_eq!(SortState::default().to_string(), "Sort: Date ↑");
    }
}
