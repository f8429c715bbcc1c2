//! User settings persisted across sessions.

use serde::{Deserialize, Serialize};

/// User-facing preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Hide the author when sharing to the feed.
    pub share_anonymously: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            share_anonymously: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_anonymous_sharing() {
        assert!(Settings::default().share_anonymously);
    }

    #[test]
    fn wire_format() {
        let s: Settings = serde_json::from_str(r#"{"shareAnonymously":false}"#).unwrap();
        assert!(!s.share_anonymously);
    }
}
