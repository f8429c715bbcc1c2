//! Prompt construction for playlist generation.
//!
//! The completion service receives mood context only through this text, so
//! every field of the mood is spelled out, present or not.

use crate::types::MoodInput;

/// Number of tracks requested from the completion service.
pub const REQUESTED_TRACKS: usize = 12;

/// System message sent ahead of every prompt.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful music curator. Always reply with compact JSON only.";

/// Builds the user prompt for a mood snapshot.
///
/// Pure: the same mood always yields the same string.
pub fn build_prompt(mood: &MoodInput) -> String {
    let emoji = mood.emoji.map(|e| e.as_str()).unwrap_or("none");
    let journal = mood.journal.as_deref().unwrap_or("");
    let heart_rate = match mood.heart_rate {
        Some(bpm) => format!("Heart rate: {} bpm.", bpm),
        None => "No heart rate.".to_string(),
    };

    format!(
        "Given this mood:\n\
         - Emoji: {emoji}\n\
         - Journal: {journal}\n\
         - Energy (0-100): {energy}\n\
         - Valence/happiness (0-100): {valence}\n\
         - {heart_rate}\n\
         \n\
         Return JSON array named \"tracks\" with {count} items. Each item has:\n\
         {{id: string, title: string, artist: string, durationSec: number}}\n\
         \n\
         Only return JSON. No commentary.",
        energy = mood.energy,
        valence = mood.valence,
        count = REQUESTED_TRACKS,
    )
}
