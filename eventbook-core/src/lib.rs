//! Core types for eventbook.
//!
//! - `Event` and its validation/normalization when read from storage
//! - `EventStore`, the owned in-memory collection and its mutations
//! - `view` for filtered, searched and sorted lists
//! - `EventSession`, which ties a store to a `KeyValueStore` backend

pub mod blob;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod storage;
pub mod store;
pub mod validate;
pub mod view;

pub use clock::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use error::{EventBookError, EventBookResult, ValidationError};
pub use event::{Event, NewEvent};
pub use session::EventSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::EventStore;
pub use view::{SortDirection, SortKey, SortState, ViewMode, ViewQuery};
