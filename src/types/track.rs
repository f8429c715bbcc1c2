//! Track and playlist types.
//!
//! A Track is one entry of a generated playlist. Tracks come out of the
//! track parser or the fallback generator and are never mutated afterwards.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique within the list it belongs to.
    pub id: String,

    /// Non-empty.
    pub title: String,

    /// Non-empty.
    pub artist: String,

    /// Always > 0.
    pub duration_sec: u32,
}

impl Track {
    /// Creates a new Track.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_sec: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            duration_sec,
        }
    }

    /// Validates that the track meets all constraints.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.id.is_empty() {
            return Some("Track ID cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.artist.trim().is_empty() {
            return Some("Artist cannot be empty".to_string());
        }
        if self.duration_sec == 0 {
            return Some("Duration must be positive".to_string());
        }
        None
    }
}

/// A named, ordered list of tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Id of the working playlist shown on the playlist screen.
    pub const CURRENT_ID: &'static str = "current";

    /// Creates a new playlist.
    pub fn new(id: impl Into<String>, name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tracks,
        }
    }

    /// Total running time in seconds.
    pub fn total_duration_sec(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration_sec)).sum()
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(Self::CURRENT_ID, "Mood Tunes Mix", Vec::new())
    }
}

/// Computes a deterministic track ID for an entry that arrived without one.
///
/// The ID is `t-` followed by the first 16 hex characters of the SHA256 hash
/// of `{title}:{artist}:{position}`.
pub fn compute_track_id(title: &str, artist: &str, position: usize) -> String {
    let input = format!("{}:{}:{}", title, artist, position);
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    // Take first 8 bytes (16 hex chars)
    format!("t-{}", hex::encode(&result[..8]))
}

/// Returns true when no two tracks share an id.
pub fn ids_are_unique(tracks: &[Track]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(tracks.len());
    tracks.iter().all(|t| seen.insert(t.id.as_str()))
}
