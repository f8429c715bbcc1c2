//! Mood-to-playlist pipeline.
//!
//! Orchestrates the prompt builder, completion client, track parser and
//! fallback generator. The pipeline cannot fail: any problem along the way
//! ends in the fallback playlist.

use serde::Serialize;
use tracing::{info, warn};

use crate::completion::CompletionClient;
use crate::types::{MoodInput, Track};

use super::fallback::fallback_tracks;
use super::parser::parse_tracks;
use super::prompt::{build_prompt, SYSTEM_INSTRUCTION};

/// Where a generated track list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackSource {
    /// Parsed from the completion service's reply.
    Completion,
    /// The static fallback list.
    Fallback,
}

impl TrackSource {
    /// Returns the string representation of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackSource::Completion => "completion",
            TrackSource::Fallback => "fallback",
        }
    }
}

/// Result of one generation: a non-empty track list and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPlaylist {
    pub tracks: Vec<Track>,
    pub source: TrackSource,
}

/// Generates playlists through a completion client.
pub struct PlaylistGenerator<C> {
    client: C,
}

impl<C: CompletionClient> PlaylistGenerator<C> {
    /// Creates a generator that uses the given client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generates a track list for a mood, reporting its source.
    ///
    /// Issues exactly one completion request.
    pub async fn generate(&self, mood: &MoodInput) -> GeneratedPlaylist {
        generate_with_source(&self.client, mood).await
    }

    /// Generates a track list for a mood.
    pub async fn generate_playlist(&self, mood: &MoodInput) -> Vec<Track> {
        self.generate(mood).await.tracks
    }
}

/// Generates a track list for a mood using any completion client.
///
/// Always resolves to a non-empty list: parsed tracks when the reply holds
/// at least one valid entry, the fallback list otherwise.
pub async fn generate_playlist(client: &dyn CompletionClient, mood: &MoodInput) -> Vec<Track> {
    generate_with_source(client, mood).await.tracks
}

async fn generate_with_source<C>(client: &C, mood: &MoodInput) -> GeneratedPlaylist
where
    C: CompletionClient + ?Sized,
{
    let prompt = build_prompt(mood);

    let parsed = match client.complete(SYSTEM_INSTRUCTION, &prompt).await {
        Some(raw) => parse_tracks(&raw),
        None => Vec::new(),
    };

    if parsed.is_empty() {
        warn!("No usable tracks from completion service, serving fallback playlist");
        return GeneratedPlaylist {
            tracks: fallback_tracks(),
            source: TrackSource::Fallback,
        };
    }

    info!(tracks = parsed.len(), "Generated playlist from completion");
    GeneratedPlaylist {
        tracks: parsed,
        source: TrackSource::Completion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays a canned reply and records what it was sent.
    struct CannedClient {
        reply: Option<String>,
        calls: AtomicUsize,
        last: Mutex<Option<(String, String)>>,
    }

    impl CannedClient {
        fn new(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, system: &str, prompt: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((system.to_string(), prompt.to_string()));
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn parsed_tracks_are_returned_in_order() {
        let client = CannedClient::new(Some(
            r#"{"tracks":[{"id":"b","title":"Second","artist":"X","durationSec":200},
                          {"id":"a","title":"First","artist":"Y","durationSec":190}]}"#,
        ));
        let generator = PlaylistGenerator::new(client);

        let result = generator.generate(&MoodInput::default()).await;
        assert_eq!(result.source, TrackSource::Completion);
        let ids: Vec<_> = result.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(generator.client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sends_system_instruction_and_prompt() {
        let client = CannedClient::new(None);
        let mood = MoodInput::default();
        generate_playlist(&client, &mood).await;

        let (system, prompt) = client.last.lock().unwrap().clone().unwrap();
        assert_eq!(system, SYSTEM_INSTRUCTION);
        assert_eq!(prompt, build_prompt(&mood));
    }

    #[tokio::test]
    async fn no_content_falls_back() {
        let client = CannedClient::new(None);
        let tracks = generate_playlist(&client, &MoodInput::default()).await;
        assert_eq!(tracks, fallback_tracks());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unparseable_reply_falls_back() {
        let client = CannedClient::new(Some("not json"));
        let result = generate_with_source(&client, &MoodInput::default()).await;
        assert_eq!(result.source, TrackSource::Fallback);
        assert_eq!(result.tracks.len(), 12);
    }

    #[tokio::test]
    async fn empty_track_list_falls_back() {
        let client = CannedClient::new(Some(r#"{"tracks":[{"title":"No artist"}]}"#));
        let tracks = generate_playlist(&client, &MoodInput::default()).await;
        assert_eq!(tracks, fallback_tracks());
    }

    #[tokio::test]
    async fn partial_result_is_not_padded() {
        let client = CannedClient::new(Some(
            r#"[{"title":"Only","artist":"One"},{"title":"Broken"}]"#,
        ));
        let tracks = generate_playlist(&client, &MoodInput::default()).await;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Only");
    }

    #[test]
    fn source_names() {
        assert_eq!(TrackSource::Completion.as_str(), "completion");
        assert_eq!(
            serde_json::to_value(TrackSource::Fallback).unwrap(),
            serde_json::json!("fallback")
        );
    }
}
