//! Static playlist served when generation yields nothing usable.

use crate::types::Track;

const FALLBACK_ENTRIES: [(&str, &str); 12] = [
    ("Skyline Dreams", "Nova Echo"),
    ("Soft Sunrise", "Lumen Bay"),
    ("Neon Breeze", "City Lights"),
    ("Ocean Letters", "Blue Hour"),
    ("Velvet Night", "Amber Waves"),
    ("Paper Planes", "Kite Kids"),
    ("Honey Drift", "Golden Tide"),
    ("Glass Garden", "Iris Bloom"),
    ("Cloud Runner", "Sky Arc"),
    ("Quiet Rivers", "Meadow Line"),
    ("Echo Park", "North Star"),
    ("Afterglow", "Solstice"),
];

/// Returns the fixed 12-track fallback playlist.
///
/// Ids are `fb-0` through `fb-11`; durations are `160 + (i % 70)` seconds.
pub fn fallback_tracks() -> Vec<Track> {
    FALLBACK_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (title, artist))| {
            Track::new(format!("fb-{}", i), *title, *artist, 160 + (i % 70) as u32)
        })
        .collect()
}
