//! JSON-RPC server over stdin/stdout.
//!
//! Implements the JSON-RPC 2.0 protocol for daemon communication. Requests
//! are handled one at a time, in arrival order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::completion::CompletionClient;
use crate::config::DaemonConfig;
use crate::error::Result;
use crate::generation::PlaylistGenerator;
use crate::state::AppState;

use super::methods::handle_request;
use super::types::{JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};

/// State shared across all request handlers.
pub struct ServerState {
    /// Application state seen by the front end.
    pub app: AppState,
    /// Playlist generator used by `generate_playlist`.
    pub generator: PlaylistGenerator<Box<dyn CompletionClient>>,
    /// Daemon configuration.
    pub config: DaemonConfig,
    /// Flag to signal server shutdown.
    shutdown: Arc<AtomicBool>,
}

impl ServerState {
    /// Creates new server state.
    pub fn new(app: AppState, client: Box<dyn CompletionClient>, config: DaemonConfig) -> Self {
        Self {
            app,
            generator: PlaylistGenerator::new(client),
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals the server to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Returns true if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Runs the JSON-RPC server, reading from stdin and writing to stdout.
pub async fn run_server(state: ServerState) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(state, stdin, stdout).await
}

/// Runs the JSON-RPC loop over arbitrary line-oriented streams.
pub async fn serve<R, W>(mut state: ServerState, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("JSON-RPC server started, waiting for requests");

    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Error reading request stream");
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = process_request(&line, &mut state).await {
            let framed = format!("{}\n", response);
            if let Err(e) = writer.write_all(framed.as_bytes()).await {
                warn!(error = %e, "Error writing response");
                break;
            }
            writer.flush().await.ok();
        }

        if state.is_shutdown() {
            info!("Server shutdown requested");
            break;
        }
    }

    info!("JSON-RPC server stopped");
    Ok(())
}

/// Processes a single JSON-RPC request line.
async fn process_request(line: &str, state: &mut ServerState) -> Option<String> {
    // Parse JSON
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            let error = JsonRpcErrorResponse::new(
                None,
                JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
            );
            return Some(serde_json::to_string(&error).unwrap_or_default());
        }
    };

    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        let error = JsonRpcErrorResponse::new(
            Some(request.id),
            JsonRpcError::invalid_request("Invalid JSON-RPC version (expected 2.0)"),
        );
        return Some(serde_json::to_string(&error).unwrap_or_default());
    }

    debug!(method = %request.method, "Handling request");

    match handle_request(&request.method, request.params, state).await {
        Ok(result) => Some(
            serde_json::to_string(&JsonRpcResponse::new(request.id, result)).unwrap_or_default(),
        ),
        Err(error) => {
            debug!(method = %request.method, code = error.code, message = %error.message, "Request failed");
            Some(
                serde_json::to_string(&JsonRpcErrorResponse::new(Some(request.id), error))
                    .unwrap_or_default(),
            )
        }
    }
}
