//! CLI argument parser for one-shot mode.
//!
//! Provides a command-line interface for generating a single playlist
//! without running the daemon.

use clap::Parser;

use crate::config::DaemonConfig;
use crate::types::{Emoji, MoodInput};

/// Default slider value when `--energy` or `--valence` is omitted.
pub const DEFAULT_SLIDER: u8 = 60;

/// moodtunes-daemon: mood-driven playlist generation
#[derive(Parser, Debug)]
#[command(name = "moodtunes-daemon")]
#[command(about = "Turns a mood into a playlist through a text-completion service")]
#[command(version)]
pub struct Cli {
    /// Mood emoji, as the symbol or its name (e.g. "😊" or "smiling")
    #[arg(short, long, value_parser = parse_emoji)]
    pub emoji: Option<Emoji>,

    /// Free-text journal entry
    #[arg(short, long)]
    pub journal: Option<String>,

    /// Energy level (0-100, default 60)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub energy: Option<u8>,

    /// Valence/happiness level (0-100, default 60)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub valence: Option<u8>,

    /// Heart rate in beats per minute
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub heart_rate: Option<u16>,

    /// Completion endpoint URL (overrides MOODTUNES_COMPLETION_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds (overrides MOODTUNES_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the prompt that would be sent and exit
    #[arg(long)]
    pub print_prompt: bool,

    /// Run in daemon mode (JSON-RPC over stdio)
    #[arg(long)]
    pub daemon: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns true if running in one-shot mode (not daemon mode).
    pub fn is_cli_mode(&self) -> bool {
        !self.daemon
            && (self.emoji.is_some()
                || self.journal.is_some()
                || self.energy.is_some()
                || self.valence.is_some()
                || self.heart_rate.is_some()
                || self.print_prompt)
    }

    /// Returns true if running in daemon mode.
    pub fn is_daemon_mode(&self) -> bool {
        self.daemon
    }

    /// Builds the mood described by the arguments.
    ///
    /// Unset sliders default to 60 and an unset journal is empty.
    pub fn to_mood(&self) -> MoodInput {
        MoodInput {
            emoji: self.emoji,
            journal: Some(self.journal.clone().unwrap_or_default()),
            energy: u32::from(self.energy.unwrap_or(DEFAULT_SLIDER)),
            valence: u32::from(self.valence.unwrap_or(DEFAULT_SLIDER)),
            heart_rate: self.heart_rate.map(u32::from),
        }
    }

    /// Applies `--url` and `--timeout` on top of a configuration.
    pub fn apply_overrides(&self, mut config: DaemonConfig) -> DaemonConfig {
        if let Some(ref url) = self.url {
            config.completion_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }
}

fn parse_emoji(s: &str) -> Result<Emoji, String> {
    Emoji::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Emoji::ALL.iter().map(|e| e.name()).collect();
        format!("unknown mood emoji '{}' (expected one of: {})", s, known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Cli {
        Cli {
            emoji: None,
            journal: None,
            energy: None,
            valence: None,
            heart_rate: None,
            url: None,
            timeout: None,
            print_prompt: false,
            daemon: false,
        }
    }

    #[test]
    fn cli_mode_detection() {
        let cli_mode = Cli {
            emoji: Some(Emoji::Smiling),
            ..empty()
        };
        assert!(cli_mode.is_cli_mode());
        assert!(!cli_mode.is_daemon_mode());

        let daemon_mode = Cli {
            emoji: Some(Emoji::Smiling),
            daemon: true,
            ..empty()
        };
        assert!(!daemon_mode.is_cli_mode());
        assert!(daemon_mode.is_daemon_mode());

        assert!(!empty().is_cli_mode());
    }

    #[test]
    fn mood_defaults() {
        let mood = empty().to_mood();
        assert_eq!(mood.emoji, None);
        assert_eq!(mood.journal.as_deref(), Some(""));
        assert_eq!(mood.energy, 60);
        assert_eq!(mood.valence, 60);
        assert_eq!(mood.heart_rate, None);
    }

    #[test]
    fn mood_from_args() {
        let cli = Cli {
            emoji: Some(Emoji::Pensive),
            journal: Some("long day".to_string()),
            energy: Some(20),
            valence: Some(30),
            heart_rate: Some(88),
            ..empty()
        };
        let mood = cli.to_mood();
        assert_eq!(mood.emoji, Some(Emoji::Pensive));
        assert_eq!(mood.journal.as_deref(), Some("long day"));
        assert_eq!(mood.energy, 20);
        assert_eq!(mood.heart_rate, Some(88));
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli {
            url: Some("http://localhost:9000/llm".to_string()),
            timeout: Some(5),
            ..empty()
        };
        let config = cli.apply_overrides(DaemonConfig::default());
        assert_eq!(config.completion_url, "http://localhost:9000/llm");
        assert_eq!(config.timeout_secs, 5);

        let untouched = empty().apply_overrides(DaemonConfig::default());
        assert_eq!(untouched.timeout_secs, crate::config::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn emoji_by_symbol_or_name() {
        assert_eq!(parse_emoji("😡"), Ok(Emoji::Angry));
        assert_eq!(parse_emoji("star-struck"), Ok(Emoji::StarStruck));
        assert!(parse_emoji("🦀").unwrap_err().contains("unknown mood emoji"));
    }

    #[test]
    fn parses_from_argv() {
        let cli = Cli::try_parse_from([
            "moodtunes-daemon",
            "--emoji",
            "calm",
            "--energy",
            "15",
        ]);
        // "calm" is not an emoji name
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["moodtunes-daemon", "--emoji", "relieved", "--energy", "15"])
            .unwrap();
        assert_eq!(cli.emoji, Some(Emoji::Relieved));
        assert_eq!(cli.energy, Some(15));

        assert!(Cli::try_parse_from(["moodtunes-daemon", "--valence", "101"]).is_err());
    }
}
