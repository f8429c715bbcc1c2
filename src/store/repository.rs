//! Typed access to the persisted settings and saved playlists.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{DaemonError, Result};
use crate::types::{Playlist, Settings};

use super::kv::KeyValueStore;

/// Key of the settings blob.
pub const SETTINGS_KEY: &str = "@moodtunes:settings";

/// Key of the saved-playlists blob.
pub const SAVED_PLAYLISTS_KEY: &str = "@moodtunes:saved";

/// Loads and saves application data over a [`KeyValueStore`].
pub struct Repository {
    store: Box<dyn KeyValueStore>,
}

impl Repository {
    /// Creates a repository over the given store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Loads settings; None if never saved or unreadable.
    pub fn load_settings(&self) -> Result<Option<Settings>> {
        self.load(SETTINGS_KEY)
    }

    /// Persists settings.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS_KEY, settings)
    }

    /// Loads saved playlists, newest first; None if never saved or unreadable.
    pub fn load_saved_playlists(&self) -> Result<Option<Vec<Playlist>>> {
        self.load(SAVED_PLAYLISTS_KEY)
    }

    /// Persists saved playlists.
    pub fn save_saved_playlists(&self, playlists: &[Playlist]) -> Result<()> {
        self.save(SAVED_PLAYLISTS_KEY, playlists)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Treat a corrupt blob like a missing one; the next save replaces it.
                warn!(key, error = %e, "Ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| DaemonError::storage_write_failed(key, e.into()))?;
        self.store.set(key, &raw)
    }
}
