//! Mood snapshot types.
//!
//! A [`MoodInput`] captures what the user reported at one point in time:
//! an optional emoji, an optional journal entry, two 0-100 sliders and an
//! optional heart rate from the wearable.

use serde::{Deserialize, Serialize};

use crate::error::{DaemonError, Result};

/// The fixed set of mood emojis offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emoji {
    #[serde(rename = "😀")]
    Grinning,
    #[serde(rename = "😊")]
    Smiling,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "😔")]
    Pensive,
    #[serde(rename = "😡")]
    Angry,
    #[serde(rename = "😴")]
    Sleeping,
    #[serde(rename = "🤩")]
    StarStruck,
    #[serde(rename = "😌")]
    Relieved,
    #[serde(rename = "😢")]
    Crying,
    #[serde(rename = "🥳")]
    Partying,
}

impl Emoji {
    /// All emojis in picker order.
    pub const ALL: [Emoji; 10] = [
        Emoji::Grinning,
        Emoji::Smiling,
        Emoji::Neutral,
        Emoji::Pensive,
        Emoji::Angry,
        Emoji::Sleeping,
        Emoji::StarStruck,
        Emoji::Relieved,
        Emoji::Crying,
        Emoji::Partying,
    ];

    /// Returns the emoji symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emoji::Grinning => "😀",
            Emoji::Smiling => "😊",
            Emoji::Neutral => "😐",
            Emoji::Pensive => "😔",
            Emoji::Angry => "😡",
            Emoji::Sleeping => "😴",
            Emoji::StarStruck => "🤩",
            Emoji::Relieved => "😌",
            Emoji::Crying => "😢",
            Emoji::Partying => "🥳",
        }
    }

    /// Returns the lowercase name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Emoji::Grinning => "grinning",
            Emoji::Smiling => "smiling",
            Emoji::Neutral => "neutral",
            Emoji::Pensive => "pensive",
            Emoji::Angry => "angry",
            Emoji::Sleeping => "sleeping",
            Emoji::StarStruck => "star-struck",
            Emoji::Relieved => "relieved",
            Emoji::Crying => "crying",
            Emoji::Partying => "partying",
        }
    }

    /// Parses an emoji from its symbol or its name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s || e.name() == lower)
    }

    /// Returns true for the emojis the feed's "happy" filter matches.
    pub fn is_happy(&self) -> bool {
        matches!(
            self,
            Emoji::Grinning | Emoji::Smiling | Emoji::StarStruck | Emoji::Partying
        )
    }

    /// Returns true for the emojis the feed's "calm" filter matches.
    pub fn is_calm(&self) -> bool {
        matches!(self, Emoji::Relieved | Emoji::Sleeping)
    }
}

impl std::fmt::Display for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One mood snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,

    /// Energy slider, 0-100. Larger values are rejected by `validate`.
    pub energy: u32,

    /// Valence/happiness slider, 0-100.
    pub valence: u32,

    /// Beats per minute reported by the wearable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
}

impl MoodInput {
    /// Upper bound of the energy and valence sliders.
    pub const SLIDER_MAX: u32 = 100;

    /// Validates slider ranges and heart rate.
    pub fn validate(&self) -> Result<()> {
        if self.energy > Self::SLIDER_MAX {
            return Err(DaemonError::invalid_mood(format!(
                "Energy must be between 0 and 100, got {}",
                self.energy
            )));
        }
        if self.valence > Self::SLIDER_MAX {
            return Err(DaemonError::invalid_mood(format!(
                "Valence must be between 0 and 100, got {}",
                self.valence
            )));
        }
        if self.heart_rate == Some(0) {
            return Err(DaemonError::invalid_mood("Heart rate must be positive"));
        }
        Ok(())
    }
}

impl Default for MoodInput {
    fn default() -> Self {
        Self {
            emoji: Some(Emoji::Smiling),
            journal: Some(String::new()),
            energy: 60,
            valence: 60,
            heart_rate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_parsing() {
        assert_eq!(Emoji::parse("😊"), Some(Emoji::Smiling));
        assert_eq!(Emoji::parse("Angry"), Some(Emoji::Angry));
        assert_eq!(Emoji::parse(" star-struck "), Some(Emoji::StarStruck));
        assert_eq!(Emoji::parse("🙂"), None);
    }

    #[test]
    fn emoji_serializes_as_symbol() {
        let json = serde_json::to_string(&Emoji::Partying).unwrap();
        assert_eq!(json, "\"🥳\"");
        let back: Emoji = serde_json::from_str("\"😴\"").unwrap();
        assert_eq!(back, Emoji::Sleeping);
    }

    #[test]
    fn emoji_symbols_are_distinct() {
        let mut symbols: Vec<_> = Emoji::ALL.iter().map(|e| e.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 10);
    }

    #[test]
    fn mood_uses_camel_case() {
        let mood: MoodInput =
            serde_json::from_str(r#"{"energy":10,"valence":20,"heartRate":72}"#).unwrap();
        assert_eq!(mood.heart_rate, Some(72));
        assert!(mood.emoji.is_none());
        assert!(mood.journal.is_none());
    }

    #[test]
    fn mood_validation() {
        let mut mood = MoodInput::default();
        assert!(mood.validate().is_ok());

        mood.energy = 101;
        assert!(mood.validate().is_err());

        mood.energy = 100;
        mood.heart_rate = Some(0);
        assert!(mood.validate().is_err());

        mood.heart_rate = Some(58);
        assert!(mood.validate().is_ok());
    }

    #[test]
    fn oversized_sliders_parse_then_fail_validation() {
        let mood: MoodInput =
            serde_json::from_str(r#"{"energy":300,"valence":20}"#).unwrap();
        let err = mood.validate().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidMood);
        assert!(err.message.contains("300"));

        let mood: MoodInput =
            serde_json::from_str(r#"{"energy":20,"valence":70000}"#).unwrap();
        assert!(mood.validate().is_err());
    }
}
