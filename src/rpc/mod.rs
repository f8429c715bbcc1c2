//! JSON-RPC module for daemon communication.
//!
//! Provides the JSON-RPC 2.0 server implementation for:
//! - `generate_playlist`: Turn the current mood into tracks
//! - `get_state`, `set_mood`, `set_playlist`, ...: Application state
//! - `get_feed`, `toggle_like`, `share_to_feed`, ...: Social feed
//! - `connect_wearable`: Simulated heart-rate pairing
//! - `ping`: Health check
//! - `shutdown`: Graceful shutdown

pub mod methods;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use server::{run_server, serve, ServerState};
pub use types::{JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, RequestId};
