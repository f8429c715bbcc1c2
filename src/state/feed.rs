//! Social feed state.
//!
//! Starts from a small built-in set of shared playlists; items shared during
//! the session are prepended. Likes are tracked per item for this user.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Emoji, FeedFilter, FeedItem, Track};

/// Feed items and this user's likes.
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    items: Vec<FeedItem>,
    likes: HashMap<String, bool>,
}

impl Feed {
    /// Creates a feed holding the built-in items.
    pub fn seeded() -> Self {
        Self::with_items(seed_items())
    }

    /// Creates a feed with the given items and no likes.
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            likes: HashMap::new(),
        }
    }

    /// Returns all items, newest first.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// Returns the item with the given id.
    pub fn get(&self, id: &str) -> Option<&FeedItem> {
        self.items.iter().find(|it| it.id == id)
    }

    /// Returns true if this user likes the item.
    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.get(id).copied().unwrap_or(false)
    }

    /// Adds an item at the top of the feed.
    pub fn prepend(&mut self, item: FeedItem) {
        self.items.insert(0, item);
    }

    /// Flips this user's like on an item and adjusts its count.
    ///
    /// Returns the updated item, or None if no item has that id.
    pub fn toggle_like(&mut self, id: &str) -> Option<&FeedItem> {
        let liked = self.is_liked(id);
        let item = self.items.iter_mut().find(|it| it.id == id)?;
        item.likes = if liked {
            item.likes.saturating_sub(1)
        } else {
            item.likes.saturating_add(1)
        };
        self.likes.insert(id.to_string(), !liked);
        Some(item)
    }

    /// Returns the items matching a filter.
    ///
    /// `Popular` orders by likes, highest first, keeping feed order on ties.
    pub fn filter(&self, filter: FeedFilter) -> Vec<FeedItem> {
        match filter {
            FeedFilter::All => self.items.clone(),
            FeedFilter::Popular => {
                let mut items = self.items.clone();
                items.sort_by(|a, b| b.likes.cmp(&a.likes));
                items
            }
            FeedFilter::Happy => self.matching(Emoji::is_happy),
            FeedFilter::Calm => self.matching(Emoji::is_calm),
        }
    }

    fn matching(&self, pred: fn(&Emoji) -> bool) -> Vec<FeedItem> {
        self.items
            .iter()
            .filter(|it| pred(&it.mood_tag))
            .cloned()
            .collect()
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self::seeded()
    }
}

fn sample_tracks() -> Vec<Track> {
    vec![
        Track::new("s1", "Sunlit Roads", "Aria Lane", 185),
        Track::new("s2", "Calm Currents", "Riverlight", 201),
        Track::new("s3", "Midnight Neon", "Pulse City", 172),
    ]
}

fn seed_items() -> Vec<FeedItem> {
    let item = |id: &str, title: &str, likes, mood_tag, popularity| FeedItem {
        id: id.to_string(),
        title: title.to_string(),
        tracks: sample_tracks(),
        likes,
        mood_tag,
        popularity,
    };
    vec![
        item("f1", "Happy Boost", 23, Emoji::Smiling, 76),
        item("f2", "Deep Focus", 45, Emoji::Relieved, 88),
        item("f3", "Night Chill", 12, Emoji::Sleeping, 52),
    ]
}
