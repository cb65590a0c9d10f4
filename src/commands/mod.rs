pub mod add;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod favorite;
pub mod list;
pub mod register;
pub mod show;
pub mod sort;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use eventbook_core::config::EventBookConfig;
use eventbook_core::{Event, EventSession, EventStore, FileStore};
use tracing::debug;

/// Load config and open the stored events.
pub async fn open_session() -> Result<EventSession<FileStore>> {
    let config = EventBookConfig::load()?;
    let storage = config.file_store();
    debug!(dir = %storage.dir().display(), key = %config.storage_key, "Opening events");

    EventSession::open_with_key(EventStore::with_defaults(), storage, &config.storage_key)
        .await
        .with_context(|| format!("Failed to load events from {}", config.data_path().display()))
}

/// Look up an event, failing with a readable message.
pub fn require_event<'a>(session: &'a EventSession<FileStore>, id: &str) -> Result<&'a Event> {
    session
        .get(id)
        .with_context(|| format!("Event '{}' not found. Run `eventbook list` to see ids.", id))
}

/// Ask a yes/no question unless `assume_yes` is set.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
