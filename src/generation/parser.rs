//! Tolerant parsing of completion text into tracks.
//!
//! The completion service is a free-form text generator, so nothing about
//! its reply is trusted: fences are stripped, two top-level shapes are
//! accepted, and entries without a usable title and artist are dropped.
//! Every failure path ends in an empty list.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::types::{compute_track_id, Track};

/// Base of the placeholder duration for entries without a usable one.
const PLACEHOLDER_DURATION_BASE: u32 = 180;

/// Placeholder durations cycle through this many values (180-239).
const PLACEHOLDER_DURATION_SPAN: usize = 60;

const FENCE: &str = "```";

/// Parses raw completion text into normalized tracks.
///
/// Returns an empty list when the text is not JSON or not one of the
/// accepted shapes: an array of track objects, or an object whose `tracks`
/// field is such an array.
pub fn parse_tracks(raw: &str) -> Vec<Track> {
    let cleaned = strip_code_fences(raw);

    let value: Value = match serde_json::from_str(cleaned) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Completion text is not valid JSON");
            return Vec::new();
        }
    };

    let entries = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("tracks") {
            Some(Value::Array(items)) => items,
            _ => {
                debug!("Completion JSON object has no tracks array");
                return Vec::new();
            }
        },
        _ => {
            debug!("Completion JSON is neither an array nor an object");
            return Vec::new();
        }
    };

    normalize(entries)
}

/// Removes triple-backtick fences around a JSON payload.
///
/// Takes the body of the first fenced block, without its language tag.
/// An opening fence without a closing one is dropped and the rest kept.
/// When that fence encloses nothing, it was a stray closing fence and the
/// text before it is the payload.
/// Unfenced text is only trimmed, so applying this twice is harmless.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let after_open = &text[open + FENCE.len()..];
    // Language tag, e.g. ```json
    let tag_len = after_open
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after_open.len());
    let body = &after_open[tag_len..];

    let fenced = match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    };
    if fenced.is_empty() {
        return text[..open].trim();
    }
    fenced
}

/// Filters out invalid entries and fills in ids and durations.
fn normalize(entries: &[Value]) -> Vec<Track> {
    let mut used_ids: HashSet<String> = HashSet::with_capacity(entries.len());
    let mut tracks = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some((title, artist)) = title_and_artist(entry) else {
            continue;
        };
        let position = tracks.len();

        let id = match provided_id(entry) {
            Some(id) if !used_ids.contains(&id) => id,
            _ => unique_generated_id(&title, &artist, position, &used_ids),
        };
        used_ids.insert(id.clone());

        let duration_sec =
            coerce_duration(entry.get("durationSec")).unwrap_or_else(|| placeholder_duration(position));

        tracks.push(Track {
            id,
            title,
            artist,
            duration_sec,
        });
    }

    if tracks.len() < entries.len() {
        debug!(
            kept = tracks.len(),
            dropped = entries.len() - tracks.len(),
            "Dropped completion entries without title or artist"
        );
    }

    tracks
}

fn title_and_artist(entry: &Value) -> Option<(String, String)> {
    let title = non_empty_str(entry.get("title")?)?;
    let artist = non_empty_str(entry.get("artist")?)?;
    Some((title, artist))
}

fn non_empty_str(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn provided_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn unique_generated_id(
    title: &str,
    artist: &str,
    position: usize,
    used: &HashSet<String>,
) -> String {
    let base = compute_track_id(title, artist, position);
    if !used.contains(&base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Rounds a numeric (or numeric string) duration; None when unusable.
fn coerce_duration(value: Option<&Value>) -> Option<u32> {
    let seconds = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !seconds.is_finite() {
        return None;
    }
    let rounded = seconds.round();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

fn placeholder_duration(position: usize) -> u32 {
    PLACEHOLDER_DURATION_BASE + (position % PLACEHOLDER_DURATION_SPAN) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ids_are_unique;

    const VALID: &str = r#"{"tracks":[
        {"id":"a1","title":"Rain Study","artist":"Low Tide","durationSec":201},
        {"id":"a2","title":"Window Seat","artist":"Pale Hours","durationSec":188}
    ]}"#;

    #[test]
    fn parses_wrapped_object() {
        let tracks = parse_tracks(VALID);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0], Track::new("a1", "Rain Study", "Low Tide", 201));
        assert_eq!(tracks[1], Track::new("a2", "Window Seat", "Pale Hours", 188));
    }

    #[test]
    fn parses_bare_array() {
        let tracks = parse_tracks(r#"[{"id":"x","title":"T","artist":"A","durationSec":99}]"#);
        assert_eq!(tracks, vec![Track::new("x", "T", "A", 99)]);
    }

    #[test]
    fn not_json_yields_empty() {
        assert!(parse_tracks("not json").is_empty());
        assert!(parse_tracks("").is_empty());
    }

    #[test]
    fn other_shapes_yield_empty() {
        assert!(parse_tracks(r#"{"songs":[]}"#).is_empty());
        assert!(parse_tracks(r#"{"tracks":"none"}"#).is_empty());
        assert!(parse_tracks("42").is_empty());
        assert!(parse_tracks(r#""tracks""#).is_empty());
    }

    #[test]
    fn fenced_matches_unfenced() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert_eq!(parse_tracks(&fenced), parse_tracks(VALID));

        let bare_fence = format!("```\n{}\n```", VALID);
        assert_eq!(parse_tracks(&bare_fence), parse_tracks(VALID));

        let with_prose = format!("Here you go:\n```json\n{}\n```\nEnjoy!", VALID);
        assert_eq!(parse_tracks(&with_prose), parse_tracks(VALID));
    }

    #[test]
    fn fence_stripping_is_idempotent() {
        let fenced = "```json\n[1, 2]\n```";
        let once = strip_code_fences(fenced);
        assert_eq!(once, "[1, 2]");
        assert_eq!(strip_code_fences(once), once);
        assert_eq!(strip_code_fences("```json[1]"), "[1]");
    }

    #[test]
    fn trailing_fence_only_keeps_payload() {
        let stray = r#"[{"title":"A","artist":"B","durationSec":200}]
```"#;
        let tracks = parse_tracks(stray);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "A");
        assert_eq!(tracks[0].duration_sec, 200);

        let glued = format!("{}```", VALID);
        assert_eq!(strip_code_fences(&glued), VALID.trim());
        assert_eq!(parse_tracks(&glued), parse_tracks(VALID));
    }

    #[test]
    fn drops_entry_missing_artist() {
        let raw = r#"[
            {"title":"One","artist":"First"},
            {"title":"Two"},
            {"title":"Three","artist":"Third"}
        ]"#;
        let tracks = parse_tracks(raw);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "One");
        assert_eq!(tracks[1].title, "Three");
        for (i, track) in tracks.iter().enumerate() {
            assert!(track.id.starts_with("t-"));
            assert_eq!(track.duration_sec, 180 + i as u32);
        }
    }

    #[test]
    fn drops_blank_and_non_string_fields() {
        let raw = r#"[
            {"title":"  ","artist":"A"},
            {"title":"T","artist":7},
            null,
            "just a string",
            {"title":"Kept","artist":"B"}
        ]"#;
        let tracks = parse_tracks(raw);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Kept");
        assert_eq!(tracks[0].duration_sec, 180);
    }

    #[test]
    fn colliding_and_absent_ids_become_distinct() {
        let raw = r#"[
            {"id":"dup","title":"A","artist":"X","durationSec":200},
            {"id":"dup","title":"B","artist":"Y","durationSec":200},
            {"title":"C","artist":"Z"},
            {"title":"C","artist":"Z"},
            {"id":"","title":"D","artist":"W"}
        ]"#;
        let tracks = parse_tracks(raw);
        assert_eq!(tracks.len(), 5);
        assert_eq!(tracks[0].id, "dup");
        assert_ne!(tracks[1].id, "dup");
        assert!(ids_are_unique(&tracks));
    }

    #[test]
    fn generated_id_avoids_provided_id() {
        let clash = compute_track_id("B", "Y", 1);
        let raw = format!(
            r#"[{{"id":"{}","title":"A","artist":"X"}},{{"title":"B","artist":"Y"}}]"#,
            clash
        );
        let tracks = parse_tracks(&raw);
        assert_eq!(tracks[0].id, clash);
        assert_eq!(tracks[1].id, format!("{}-1", clash));
    }

    #[test]
    fn numeric_ids_are_kept_as_strings() {
        let tracks = parse_tracks(r#"[{"id":7,"title":"T","artist":"A","durationSec":100}]"#);
        assert_eq!(tracks[0].id, "7");
    }

    #[test]
    fn duration_coercion() {
        let raw = r#"[
            {"title":"a","artist":"x","durationSec":200.6},
            {"title":"b","artist":"x","durationSec":"215"},
            {"title":"c","artist":"x","durationSec":"3:20"},
            {"title":"d","artist":"x","durationSec":0},
            {"title":"e","artist":"x","durationSec":-30},
            {"title":"f","artist":"x","durationSec":null}
        ]"#;
        let durations: Vec<u32> = parse_tracks(raw).iter().map(|t| t.duration_sec).collect();
        assert_eq!(durations, vec![201, 215, 182, 183, 184, 185]);
    }

    #[test]
    fn placeholder_durations_stay_in_range() {
        for position in 0..200 {
            let d = placeholder_duration(position);
            assert!((180..=239).contains(&d));
        }
    }

    #[test]
    fn every_kept_track_is_valid() {
        let raw = r#"{"tracks":[
            {"title":" Padded ","artist":" Name ","durationSec":1e9},
            {"title":"Huge","artist":"N","durationSec":1e12}
        ]}"#;
        let tracks = parse_tracks(raw);
        assert_eq!(tracks[0].title, "Padded");
        assert_eq!(tracks[0].artist, "Name");
        assert_eq!(tracks[0].duration_sec, 1_000_000_000);
        assert_eq!(tracks[1].duration_sec, 181);
        assert!(tracks.iter().all(|t| t.validate().is_none()));
    }
}
