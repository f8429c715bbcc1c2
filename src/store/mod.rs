//! Persistence module.
//!
//! Provides the key-value stores and the repository that maps settings and
//! saved playlists onto them.

pub mod kv;
pub mod repository;

// Re-export commonly used types
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{Repository, SAVED_PLAYLISTS_KEY, SETTINGS_KEY};
