//! moodtunes-daemon: mood-driven playlist generation.
//!
//! This binary can run in two modes:
//! - CLI mode: Generate one playlist from command-line mood arguments
//! - Daemon mode: JSON-RPC server for the front end

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodtunes_daemon::cli::Cli;
use moodtunes_daemon::completion::HttpCompletionClient;
use moodtunes_daemon::config::DaemonConfig;
use moodtunes_daemon::error::{DaemonError, ErrorCode, Result};
use moodtunes_daemon::generation::{build_prompt, PlaylistGenerator};
use moodtunes_daemon::rpc::{run_server, ServerState};
use moodtunes_daemon::state::AppState;
use moodtunes_daemon::store::{FileStore, Repository};

#[tokio::main]
async fn main() {
    // stdout carries JSON-RPC frames, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtunes_daemon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.is_daemon_mode() {
        run_daemon_mode(&cli).await
    } else if cli.is_cli_mode() {
        run_cli_mode(&cli).await
    } else {
        print_usage();
        Ok(())
    }
}

fn load_config(cli: &Cli) -> Result<DaemonConfig> {
    let config = cli.apply_overrides(DaemonConfig::from_env());
    if let Some(problem) = config.validate() {
        return Err(DaemonError::config_invalid(problem));
    }
    Ok(config)
}

/// Runs the CLI mode: one playlist, printed as JSON.
async fn run_cli_mode(cli: &Cli) -> Result<()> {
    let mood = cli.to_mood();
    mood.validate()?;

    if cli.print_prompt {
        println!("{}", build_prompt(&mood));
        return Ok(());
    }

    let config = load_config(cli)?;

    eprintln!("=== moodtunes-daemon CLI ===");
    eprintln!(
        "Mood: {} energy={} valence={}",
        mood.emoji.map(|e| e.as_str()).unwrap_or("none"),
        mood.energy,
        mood.valence
    );
    eprintln!("Endpoint: {}", config.completion_url);
    eprintln!();

    let generator = PlaylistGenerator::new(HttpCompletionClient::from_config(&config)?);
    let generated = generator.generate(&mood).await;

    eprintln!(
        "Generated {} tracks ({})",
        generated.tracks.len(),
        generated.source.as_str()
    );

    let json = serde_json::to_string_pretty(&generated.tracks).map_err(|e| {
        DaemonError::new(
            ErrorCode::CompletionResponseInvalid,
            format!("Failed to serialize tracks: {}", e),
        )
    })?;
    println!("{}", json);
    Ok(())
}

/// Runs the daemon mode (JSON-RPC server).
async fn run_daemon_mode(cli: &Cli) -> Result<()> {
    eprintln!("=== moodtunes-daemon JSON-RPC Server ===");
    eprintln!("Reading from stdin, writing to stdout.");
    eprintln!("Send JSON-RPC requests to control the daemon.");
    eprintln!();

    let config = load_config(cli)?;
    let data_path = config.effective_data_path();
    info!(
        data_path = %data_path.display(),
        completion_url = %config.completion_url,
        timeout_secs = config.timeout_secs,
        "Starting daemon"
    );

    let app = AppState::load(Repository::new(FileStore::new(data_path)));
    let client = HttpCompletionClient::from_config(&config)?;
    let state = ServerState::new(app, Box::new(client), config);

    run_server(state).await
}

/// Prints usage information.
fn print_usage() {
    eprintln!("moodtunes-daemon: turn a mood into a playlist");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  One-shot generation:");
    eprintln!("    moodtunes-daemon --emoji 😊 --journal \"sunny walk\" --energy 70 --valence 80");
    eprintln!();
    eprintln!("  Show the prompt without calling the service:");
    eprintln!("    moodtunes-daemon --emoji sleeping --energy 20 --print-prompt");
    eprintln!();
    eprintln!("  Daemon mode (JSON-RPC server):");
    eprintln!("    moodtunes-daemon --daemon");
    eprintln!();
    eprintln!("Run 'moodtunes-daemon --help' for full options.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_usage_doesnt_panic() {
        print_usage();
    }
}
