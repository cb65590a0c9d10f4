//! Key-value persistence for serialized blobs.
//!
//! The event collection is stored as one text value under a well-known key.
//! Any backend that can get and set text by key can host it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{EventBookError, EventBookResult};

/// Default key holding the serialized event collection.
pub const EVENTS_KEY: &str = "events";
/// Key holding the last selected sort key and direction.
pub const SORT_STATE_KEY: &str = "sortState";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`, or `None` if nothing was ever stored.
    async fn get(&self, key: &str) -> EventBookResult<Option<String>>;

    /// Replace the value at `key`.
    async fn set(&self, key: &str, value: &str) -> EventBookResult<()>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> EventBookResult<Option<String>> {
        let path = self.path_for(key);

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EventBookError::Persistence(format!(
                "Could not read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> EventBookResult<()> {
        let path = self.path_for(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        let write = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(&temp, value).await?;
            tokio::fs::rename(&temp, &path).await
        };

        write.await.map_err(|e| {
            EventBookError::Persistence(format!("Could not write {}: {}", path.display(), e))
        })
    }
}

/// In-memory store. Reads and writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` at `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value at `key`, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent strings.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> EventBookResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(EventBookError::Persistence(format!("Could not read '{}'", key)));
        }
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> EventBookResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(EventBookError::Persistence(format!("Could not write '{}'", key)));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get(EVENTS_KEY).await.unwrap(), None);

        store.set(EVENTS_KEY, "[]").await.unwrap();
        assert_eq!(store.get(EVENTS_KEY).await.unwrap().as_deref(), Some("[]"));
        assert!(store.dir().join("events.json").exists());
        assert!(!store.dir().join("events.json.tmp").exists());

        store.set(EVENTS_KEY, "[1]").await.unwrap();
        assert_eq!(store.get(EVENTS_KEY).await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn file_store_write_failure_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let store = FileStore::new(&blocker);
        let err = store.set(EVENTS_KEY, "[]").await.unwrap_err();
        assert!(matches!(err, EventBookError::Persistence(_)));
    }

    #[tokio::test]
    async fn memory_store_failure_injection() {
        let store = MemoryStore::with_value(EVENTS_KEY, "[]");
        assert_eq!(store.get(EVENTS_KEY).await.unwrap().as_deref(), Some("[]"));

        store.set_fail_writes(true);
        assert!(store.set(EVENTS_KEY, "[1]").await.is_err());
        assert_eq!(store.peek(EVENTS_KEY).as_deref(), Some("[]"));

        store.set_fail_reads(true);
        assert!(matches!(
            store.get(EVENTS_KEY).await,
            Err(EventBookError::Persistence(_))
        ));
    }
}
