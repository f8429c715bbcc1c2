//! Playlist generation module.
//!
//! Provides the mood-to-playlist pipeline: prompt construction, tolerant
//! parsing of the completion reply, and the static fallback list.

pub mod fallback;
pub mod parser;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used items
pub use fallback::fallback_tracks;
pub use parser::{parse_tracks, strip_code_fences};
pub use pipeline::{generate_playlist, GeneratedPlaylist, PlaylistGenerator, TrackSource};
pub use prompt::{build_prompt, REQUESTED_TRACKS, SYSTEM_INSTRUCTION};
