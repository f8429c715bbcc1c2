//! moodtunes-daemon: mood-driven playlist generation.
//!
//! This library turns a mood (emoji, journal text, energy and valence
//! sliders, optional heart rate) into a playlist by asking a remote
//! text-completion service for track suggestions. Whatever the service
//! does, the pipeline resolves to a non-empty track list: unusable
//! replies are replaced by a fixed fallback playlist.
//!
//! # Modules
//!
//! - [`types`]: Core data types (MoodInput, Track, Playlist, FeedItem)
//! - [`generation`]: Prompt builder, reply parser, fallback and pipeline
//! - [`completion`]: Completion client trait and its HTTP implementation
//! - [`state`]: Application state served to the front end
//! - [`store`]: Key-value persistence for settings and saved playlists
//! - [`rpc`]: JSON-RPC server over stdio
//! - [`config`]: Runtime configuration (DaemonConfig)
//! - [`error`]: Error types and codes (DaemonError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use moodtunes_daemon::{
//!     completion::HttpCompletionClient,
//!     config::DaemonConfig,
//!     generation::generate_playlist,
//!     types::{Emoji, MoodInput},
//! };
//!
//! let client = HttpCompletionClient::from_config(&DaemonConfig::from_env())?;
//! let mood = MoodInput {
//!     emoji: Some(Emoji::Relieved),
//!     journal: Some("rainy sunday".to_string()),
//!     energy: 30,
//!     valence: 70,
//!     heart_rate: None,
//! };
//!
//! let tracks = generate_playlist(&client, &mood).await;
//! assert!(!tracks.is_empty());
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod generation;
pub mod rpc;
pub mod state;
pub mod store;
pub mod types;
pub mod wearable;

// Re-export commonly used types at crate root for convenience
pub use completion::{CompletionClient, HttpCompletionClient};
pub use config::DaemonConfig;
pub use error::{DaemonError, ErrorCode, Result};
pub use generation::{generate_playlist, GeneratedPlaylist, PlaylistGenerator, TrackSource};
pub use types::{compute_track_id, Emoji, MoodInput, Playlist, Track};
