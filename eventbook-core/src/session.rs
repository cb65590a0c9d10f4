//! One application session: an owned `EventStore` plus its storage.
//!
//! The session loads the collection once and writes the whole collection
//! back after every mutation. A failed write is reported to the caller,
//! but the in-memory change stays; the next mutation writes everything
//! again.

use tracing::warn;

use crate::error::{EventBookError, EventBookResult};
use crate::event::{Event, NewEvent};
use crate::storage::{EVENTS_KEY, KeyValueStore, SORT_STATE_KEY};
use crate::store::EventStore;
use crate::view::{SortKey, SortState, ViewQuery};

pub struct EventSession<S: KeyValueStore> {
    store: EventStore,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> EventSession<S> {
    /// Load the collection stored under the default key.
    pub async fn open(store: EventStore, storage: S) -> EventBookResult<Self> {
        Self::open_with_key(store, storage, EVENTS_KEY).await
    }

    /// Load the collection stored under `key`.
    ///
    /// Malformed data is not an error; only a failed read is.
    pub async fn open_with_key(
        mut store: EventStore,
        storage: S,
        key: &str,
    ) -> EventBookResult<Self> {
        let raw = storage.get(key).await?;
        store.load(raw.as_deref());

        Ok(EventSession {
            store,
            storage,
            key: key.to_string(),
        })
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn events(&self) -> &[Event] {
        self.store.events()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.store.get(id)
    }

    pub fn view(&self, query: &ViewQuery) -> Vec<&Event> {
        self.store.view(query)
    }

    /// Write the full collection to storage.
    pub async fn save(&self) -> EventBookResult<()> {
        let blob = self.store.to_blob()?;
        self.storage.set(&self.key, &blob).await.inspect_err(|e| {
            warn!("Failed to save events: {}", e);
        })
    }

    // Mutations: apply in memory, then persist.

    /// Returns the new event's id.
    pub async fn create(&mut self, input: NewEvent) -> EventBookResult<String> {
        let id = self.store.create(input)?.id.clone();
        self.save().await?;
        Ok(id)
    }

    pub async fn update(&mut self, event: Event) -> EventBookResult<()> {
        self.store.update(event)?;
        self.save().await
    }

    pub async fn delete(&mut self, id: &str) -> EventBookResult<()> {
        self.store.delete(id);
        self.save().await
    }

    pub async fn clear(&mut self) -> EventBookResult<()> {
        self.store.clear();
        self.save().await
    }

    pub async fn toggle_favorite(&mut self, id: &str) -> EventBookResult<Event> {
        let event = self.store.toggle_favorite(id)?.clone();
        self.save().await?;
        Ok(event)
    }

    pub async fn register(&mut self, id: &str, email: &str) -> EventBookResult<Event> {
        let event = self.store.register(id, email)?.clone();
        self.save().await?;
        Ok(event)
    }

    pub async fn cancel_registration(&mut self, id: &str) -> EventBookResult<Event> {
        let event = self.store.cancel_registration(id)?.clone();
        self.save().await?;
        Ok(event)
    }

    // Sort preference, kept beside the events.

    /// The stored sort state, or the default if none was saved or it
    /// does not parse.
    pub async fn sort_state(&self) -> EventBookResult<SortState> {
        let raw = self.storage.get(SORT_STATE_KEY).await?;
        Ok(raw
            .and_then(|r| serde_json::from_str(&r).ok())
            .unwrap_or_default())
    }

    /// Apply the sort toggle rule for `key` and store the result.
    pub async fn select_sort(&self, key: SortKey) -> EventBookResult<SortState> {
        let next = self.sort_state().await?.select(key);
        let raw = serde_json::to_string(&next)
            .map_err(|e| EventBookError::Serialization(e.to_string()))?;
        self.storage.set(SORT_STATE_KEY, &raw).await?;
        Ok(next)
    }
}
