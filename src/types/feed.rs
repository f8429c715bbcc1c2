//! Social feed types.

use serde::{Deserialize, Serialize};

use super::mood::Emoji;
use super::track::Track;

/// A playlist shared to the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub tracks: Vec<Track>,
    pub likes: u32,
    pub mood_tag: Emoji,
    /// 0-100.
    pub popularity: u8,
}

/// Feed view filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFilter {
    #[default]
    All,
    /// Most liked first.
    Popular,
    Happy,
    Calm,
}

impl FeedFilter {
    /// Returns the string representation of the filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedFilter::All => "all",
            FeedFilter::Popular => "popular",
            FeedFilter::Happy => "happy",
            FeedFilter::Calm => "calm",
        }
    }

    /// Parses a filter from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(FeedFilter::All),
            "popular" => Some(FeedFilter::Popular),
            "happy" => Some(FeedFilter::Happy),
            "calm" => Some(FeedFilter::Calm),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parsing() {
        assert_eq!(FeedFilter::parse("Popular"), Some(FeedFilter::Popular));
        assert_eq!(FeedFilter::parse("calm"), Some(FeedFilter::Calm));
        assert_eq!(FeedFilter::parse("sad"), None);
        assert_eq!(FeedFilter::default().as_str(), "all");
    }

    #[test]
    fn feed_item_wire_format() {
        let item = FeedItem {
            id: "f9".to_string(),
            title: "Test".to_string(),
            tracks: Vec::new(),
            likes: 1,
            mood_tag: Emoji::Relieved,
            popularity: 40,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["moodTag"], "😌");
        assert_eq!(json["likes"], 1);
    }
}
