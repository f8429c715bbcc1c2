//! Application state owned by the daemon.
//!
//! Holds everything the front end displays: the current mood and playlist,
//! saved playlists, settings, the feed and the wearable. State is loaded
//! from the repository once at startup; settings and saved playlists are
//! written back on every mutation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DaemonError, Result};
use crate::store::Repository;
use crate::types::{Emoji, FeedFilter, FeedItem, MoodInput, Playlist, Settings, Track};
use crate::wearable::{self, Wearable};

use super::feed::Feed;

/// Identifies one playlist generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GenerationTicket(u64);

/// Serializable view of the whole state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot<'a> {
    pub quick_mood_emoji: Option<Emoji>,
    pub wearable: Option<Wearable>,
    pub mood: &'a MoodInput,
    pub playlist: &'a Playlist,
    pub saved_playlists: &'a [Playlist],
    pub settings: Settings,
    pub feed: &'a [FeedItem],
}

/// Application state with explicit persistence.
pub struct AppState {
    repository: Repository,
    quick_mood_emoji: Option<Emoji>,
    wearable: Option<Wearable>,
    mood: MoodInput,
    playlist: Playlist,
    saved_playlists: Vec<Playlist>,
    settings: Settings,
    feed: Feed,
    latest_generation: u64,
    last_id_millis: u64,
}

impl AppState {
    /// Creates state with defaults, without reading the repository.
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            quick_mood_emoji: None,
            wearable: None,
            mood: MoodInput::default(),
            playlist: Playlist::default(),
            saved_playlists: Vec::new(),
            settings: Settings::default(),
            feed: Feed::seeded(),
            latest_generation: 0,
            last_id_millis: 0,
        }
    }

    /// Creates state and loads persisted settings and saved playlists.
    ///
    /// Read failures are logged and leave the defaults in place.
    pub fn load(repository: Repository) -> Self {
        let mut state = Self::new(repository);

        match state.repository.load_settings() {
            Ok(Some(settings)) => state.settings = settings,
            Ok(None) => {}
            Err(e) => warn!(code = %e.code, error = %e.message, "Failed to load settings"),
        }

        match state.repository.load_saved_playlists() {
            Ok(Some(saved)) => state.saved_playlists = saved,
            Ok(None) => {}
            Err(e) => warn!(code = %e.code, error = %e.message, "Failed to load saved playlists"),
        }

        info!(
            saved_playlists = state.saved_playlists.len(),
            "Application state loaded"
        );
        state
    }

    /// Returns a serializable view of the state.
    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot {
            quick_mood_emoji: self.quick_mood_emoji,
            wearable: self.wearable,
            mood: &self.mood,
            playlist: &self.playlist,
            saved_playlists: &self.saved_playlists,
            settings: self.settings,
            feed: self.feed.items(),
        }
    }

    pub fn quick_mood_emoji(&self) -> Option<Emoji> {
        self.quick_mood_emoji
    }

    pub fn wearable(&self) -> Option<Wearable> {
        self.wearable
    }

    pub fn mood(&self) -> &MoodInput {
        &self.mood
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn saved_playlists(&self) -> &[Playlist] {
        &self.saved_playlists
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Sets the emoji picked on the home screen; it also becomes the mood's emoji.
    pub fn set_quick_mood_emoji(&mut self, emoji: Option<Emoji>) {
        self.quick_mood_emoji = emoji;
        if emoji.is_some() {
            self.mood.emoji = emoji;
        }
    }

    /// Replaces the current mood after validating it.
    pub fn set_mood(&mut self, mood: MoodInput) -> Result<()> {
        mood.validate()?;
        self.mood = mood;
        Ok(())
    }

    /// Replaces the current playlist.
    pub fn set_playlist(&mut self, playlist: Playlist) {
        self.playlist = playlist;
    }

    /// Saves a copy of a playlist under a fresh id, newest first.
    ///
    /// If the write fails the entry is removed again, so memory and store agree.
    pub fn save_playlist(&mut self, playlist: &Playlist) -> Result<Playlist> {
        let entry = Playlist {
            id: self.next_id(),
            ..playlist.clone()
        };
        self.saved_playlists.insert(0, entry.clone());
        if let Err(e) = self.persist_saved_playlists() {
            self.saved_playlists.remove(0);
            return Err(e);
        }
        Ok(entry)
    }

    /// Replaces settings and persists them.
    ///
    /// The previous settings stay in effect if the write fails.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        self.repository.save_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Starts a generation; only the latest ticket's result will be applied.
    pub fn begin_generation(&mut self) -> GenerationTicket {
        self.latest_generation += 1;
        GenerationTicket(self.latest_generation)
    }

    /// Installs generated tracks as the current playlist's tracks.
    ///
    /// Returns false, leaving the playlist untouched, when a newer
    /// generation was started after `ticket`.
    pub fn apply_generation(&mut self, ticket: GenerationTicket, tracks: Vec<Track>) -> bool {
        if ticket.0 != self.latest_generation {
            debug!(
                ticket = ticket.0,
                latest = self.latest_generation,
                "Discarding stale generation result"
            );
            return false;
        }
        self.playlist.tracks = tracks;
        true
    }

    /// Shares the current playlist to the top of the feed.
    pub fn share_to_feed(&mut self) -> FeedItem {
        let item = FeedItem {
            id: self.next_id(),
            title: self.playlist.name.clone(),
            tracks: self.playlist.tracks.clone(),
            likes: 0,
            mood_tag: self.mood.emoji.unwrap_or(Emoji::Neutral),
            popularity: rand::thread_rng().gen_range(0..=100),
        };
        self.feed.prepend(item.clone());
        item
    }

    /// Flips this user's like on a feed item.
    pub fn toggle_like(&mut self, id: &str) -> Result<FeedItem> {
        self.feed
            .toggle_like(id)
            .cloned()
            .ok_or_else(|| DaemonError::feed_item_not_found(id))
    }

    /// Saves a feed item's tracks as a new saved playlist.
    pub fn save_from_feed(&mut self, id: &str) -> Result<Playlist> {
        let item = self
            .feed
            .get(id)
            .ok_or_else(|| DaemonError::feed_item_not_found(id))?;
        let playlist = Playlist::new(format!("saved-{}", id), item.title.clone(), item.tracks.clone());
        self.save_playlist(&playlist)
    }

    /// Returns feed items matching a filter.
    pub fn filter_feed(&self, filter: FeedFilter) -> Vec<FeedItem> {
        self.feed.filter(filter)
    }

    /// Pairs the simulated wearable and feeds its heart rate into the mood.
    pub async fn connect_wearable(&mut self, delay: Duration) -> Wearable {
        let wearable = wearable::connect(delay).await;
        self.wearable = Some(wearable);
        self.mood.heart_rate = Some(u32::from(wearable.heart_rate));
        wearable
    }

    /// Unpairs the wearable and clears the mood's heart rate.
    pub fn disconnect_wearable(&mut self) {
        self.wearable = None;
        self.mood.heart_rate = None;
    }

    fn persist_saved_playlists(&self) -> Result<()> {
        self.repository.save_saved_playlists(&self.saved_playlists)
    }

    /// Returns a millisecond timestamp id, strictly increasing within the process.
    fn next_id(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.last_id_millis = now.max(self.last_id_millis + 1);
        self.last_id_millis.to_string()
    }
}
