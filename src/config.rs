//! Daemon configuration module.
//!
//! Contains the runtime configuration for the moodtunes-daemon, including
//! the completion endpoint, request timeout, and data directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Completion endpoint used when none is configured.
pub const DEFAULT_COMPLETION_URL: &str = "https://toolkit.rork.com/text/llm/";

/// Default completion request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default simulated wearable pairing delay in milliseconds.
pub const DEFAULT_WEARABLE_DELAY_MS: u64 = 800;

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_WEARABLE_DELAY_MS: u64 = 10_000;

/// Runtime configuration for the daemon.
///
/// This configuration is typically loaded from command-line arguments
/// or environment variables at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Text-completion endpoint receiving playlist prompts.
    pub completion_url: String,

    /// Timeout for the single completion request, in seconds.
    pub timeout_secs: u64,

    /// Directory holding the persisted key-value blobs.
    /// If None, uses the platform-specific default data location.
    pub data_path: Option<PathBuf>,

    /// Delay before the simulated wearable reports a heart rate.
    pub wearable_delay_ms: u64,
}

impl DaemonConfig {
    /// Creates a new DaemonConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DaemonConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `MOODTUNES_COMPLETION_URL` - Completion endpoint URL
    /// - `MOODTUNES_TIMEOUT_SECS` - Request timeout (1-300)
    /// - `MOODTUNES_DATA_PATH` - Directory for persisted settings and playlists
    /// - `MOODTUNES_WEARABLE_DELAY_MS` - Simulated wearable delay (0-10000)
    ///
    /// Falls back to defaults for unset or invalid variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MOODTUNES_COMPLETION_URL") {
            if !url.trim().is_empty() {
                config.completion_url = url.trim().to_string();
            }
        }

        if let Ok(timeout_str) = std::env::var("MOODTUNES_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                if (1..=MAX_TIMEOUT_SECS).contains(&timeout) {
                    config.timeout_secs = timeout;
                }
            }
        }

        if let Ok(path) = std::env::var("MOODTUNES_DATA_PATH") {
            config.data_path = Some(PathBuf::from(path));
        }

        if let Ok(delay_str) = std::env::var("MOODTUNES_WEARABLE_DELAY_MS") {
            if let Ok(delay) = delay_str.parse::<u64>() {
                if delay <= MAX_WEARABLE_DELAY_MS {
                    config.wearable_delay_ms = delay;
                }
            }
        }

        config
    }

    /// Returns the effective data path, using platform defaults if not specified.
    pub fn effective_data_path(&self) -> PathBuf {
        if let Some(ref path) = self.data_path {
            path.clone()
        } else {
            default_data_path()
        }
    }

    /// Returns the completion request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the simulated wearable pairing delay.
    pub fn wearable_delay(&self) -> Duration {
        Duration::from_millis(self.wearable_delay_ms)
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if !self.completion_url.starts_with("http://") && !self.completion_url.starts_with("https://")
        {
            return Some(format!(
                "completion_url must start with http:// or https://, got {}",
                self.completion_url
            ));
        }

        if self.timeout_secs == 0 {
            return Some("timeout_secs must be > 0".to_string());
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Some(format!(
                "timeout_secs too high: {} (max {})",
                self.timeout_secs, MAX_TIMEOUT_SECS
            ));
        }

        if self.wearable_delay_ms > MAX_WEARABLE_DELAY_MS {
            return Some(format!(
                "wearable_delay_ms too high: {} (max {})",
                self.wearable_delay_ms, MAX_WEARABLE_DELAY_MS
            ));
        }

        None
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_path: None,
            wearable_delay_ms: DEFAULT_WEARABLE_DELAY_MS,
        }
    }
}

/// Returns the platform-specific default data storage path.
///
/// Uses the `directories` crate to find appropriate locations:
/// - macOS: ~/Library/Application Support/moodtunes/store
/// - Linux: ~/.local/share/moodtunes/store
/// - Windows: C:\Users\<user>\AppData\Roaming\moodtunes\data\store
fn default_data_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "moodtunes") {
        proj_dirs.data_dir().join("store")
    } else {
        // Fallback to current directory
        PathBuf::from("./moodtunes-store")
    }
}
