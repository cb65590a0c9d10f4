//! Global eventbook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventBookError, EventBookResult};
use crate::storage::{EVENTS_KEY, FileStore};

static DEFAULT_DATA_DIR: &str = "~/.local/share/eventbook";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    EVENTS_KEY.to_string()
}

/// Configuration at ~/.config/eventbook/config.toml
///
/// Every key can be overridden from the environment with an `EVENTBOOK_`
/// prefix, e.g. `EVENTBOOK_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventBookConfig {
    /// Where stored blobs live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key holding the serialized events
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for EventBookConfig {
    fn default() -> Self {
        EventBookConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl EventBookConfig {
    pub fn config_path() -> EventBookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventBookError::Config("Could not determine config directory".into()))?
            .join("eventbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented default file on
    /// first use.
    pub fn load() -> EventBookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus environment overrides.
    pub fn load_from(path: &Path) -> EventBookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVENTBOOK"))
            .build()
            .map_err(|e| EventBookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventBookError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// File-backed storage rooted at `data_path()`.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    pub fn save(&self, path: &Path) -> EventBookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EventBookError::Config(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventBookResult<()> {
        let contents = format!(
            "\
# eventbook configuration

# Where events are stored:
# data_dir = \"{}\"

# Storage key for the event collection:
# storage_key = \"{}\"
",
            DEFAULT_DATA_DIR, EVENTS_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EventBookConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.storage_key, "events");
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eventbook").join("config.toml");
        EventBookConfig::create_default_config(&path).unwrap();

        let config = EventBookConfig::load_from(&path).unwrap();
        assert_eq!(config.storage_key, EventBookConfig::default().storage_key);
    }

    #[test]
    fn saved_values_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = EventBookConfig {
            data_dir: dir.path().join("data"),
            storage_key: "planner-events".to_string(),
        };
        config.save(&path).unwrap();

        let loaded = EventBookConfig::load_from(&path).unwrap();
        assert_eq!(loaded.storage_key, "planner-events");
        assert_eq!(loaded.data_path(), dir.path().join("data"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let err = EventBookConfig::default().save(&path).unwrap_err();
        assert!(matches!(err, EventBookError::Io(_)));

        let err = EventBookConfig::create_default_config(&path).unwrap_err();
        assert!(matches!(err, EventBookError::Io(_)));
    }
}
