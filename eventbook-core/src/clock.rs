//! Injectable sources of "now" and of fresh event ids.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

/// Supplies the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Supplies unique ids for newly created events.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids `"{prefix}-1"`, `"{prefix}-2"`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        SequentialIds {
            prefix: prefix.to_string(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuids_do_not_repeat() {
        let ids: HashSet<_> = (0..1000).map(|_| UuidGenerator.generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new("evt");
        assert_eq!(ids.generate(), "evt-1");
        assert_eq!(ids.generate(), "evt-2");
    }
}
