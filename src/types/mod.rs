//! Core types for the moodtunes-daemon.
//!
//! This module re-exports all the core data types used throughout the daemon:
//! - [`MoodInput`]: One mood snapshot reported by the user
//! - [`Track`] and [`Playlist`]: Generated or saved playlists
//! - [`FeedItem`]: A playlist shared to the social feed
//! - [`Settings`]: Persisted user preferences

mod feed;
mod mood;
mod settings;
mod track;

// Re-export all types at the module level
pub use feed::{FeedFilter, FeedItem};
pub use mood::{Emoji, MoodInput};
pub use settings::Settings;
pub use track::{compute_track_id, ids_are_unique, Playlist, Track};
