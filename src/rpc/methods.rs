//! JSON-RPC method handlers.
//!
//! Implements the handlers for all supported JSON-RPC methods.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::types::{MoodInput, Playlist, Settings};

use super::server::ServerState;
use super::types::{
    FeedItemParams, FeedParams, GeneratePlaylistParams, JsonRpcError, QuickMoodParams,
    SavePlaylistParams,
};

type MethodResult = Result<Value, JsonRpcError>;

/// Handles a JSON-RPC method call.
pub async fn handle_request(method: &str, params: Value, state: &mut ServerState) -> MethodResult {
    match method {
        "ping" => handle_ping(),
        "shutdown" => handle_shutdown(state),
        "get_state" => to_result(state.app.snapshot()),
        "set_mood" => handle_set_mood(params, state),
        "set_quick_mood" => handle_set_quick_mood(params, state),
        "generate_playlist" => handle_generate_playlist(params, state).await,
        "set_playlist" => handle_set_playlist(params, state),
        "save_playlist" => handle_save_playlist(params, state),
        "get_saved_playlists" => to_result(state.app.saved_playlists()),
        "get_settings" => to_result(state.app.settings()),
        "set_settings" => handle_set_settings(params, state),
        "get_feed" => handle_get_feed(params, state),
        "toggle_like" => handle_toggle_like(params, state),
        "save_from_feed" => handle_save_from_feed(params, state),
        "share_to_feed" => to_result(state.app.share_to_feed()),
        "connect_wearable" => handle_connect_wearable(state).await,
        "disconnect_wearable" => {
            state.app.disconnect_wearable();
            Ok(Value::Null)
        }
        _ => Err(JsonRpcError::method_not_found(method)),
    }
}

/// Handles the ping method for health checks.
fn handle_ping() -> MethodResult {
    Ok(serde_json::json!({ "status": "ok" }))
}

/// Handles the shutdown method.
fn handle_shutdown(state: &mut ServerState) -> MethodResult {
    state.shutdown();
    Ok(serde_json::json!({ "status": "shutting_down" }))
}

fn handle_set_mood(params: Value, state: &mut ServerState) -> MethodResult {
    let mood: MoodInput = required_params(params)?;
    state.app.set_mood(mood)?;
    to_result(state.app.mood())
}

fn handle_set_quick_mood(params: Value, state: &mut ServerState) -> MethodResult {
    let params: QuickMoodParams = optional_params(params)?;
    state.app.set_quick_mood_emoji(params.emoji);
    to_result(state.app.mood())
}

/// Handles the generate_playlist method.
///
/// A mood passed in the params replaces the current mood first. The result
/// is installed as the current playlist's tracks unless another generation
/// started in the meantime.
async fn handle_generate_playlist(params: Value, state: &mut ServerState) -> MethodResult {
    let params: GeneratePlaylistParams = optional_params(params)?;
    if let Some(mood) = params.mood {
        state.app.set_mood(mood)?;
    }

    let mood = state.app.mood().clone();
    let ticket = state.app.begin_generation();
    let generated = state.generator.generate(&mood).await;

    let applied = state.app.apply_generation(ticket, generated.tracks.clone());
    info!(
        tracks = generated.tracks.len(),
        source = generated.source.as_str(),
        applied,
        "Playlist generation finished"
    );

    to_result(generated)
}

fn handle_set_playlist(params: Value, state: &mut ServerState) -> MethodResult {
    let playlist: Playlist = required_params(params)?;
    state.app.set_playlist(playlist);
    to_result(state.app.playlist())
}

fn handle_save_playlist(params: Value, state: &mut ServerState) -> MethodResult {
    let params: SavePlaylistParams = optional_params(params)?;
    let playlist = params
        .playlist
        .unwrap_or_else(|| state.app.playlist().clone());
    let saved = state.app.save_playlist(&playlist)?;
    to_result(saved)
}

fn handle_set_settings(params: Value, state: &mut ServerState) -> MethodResult {
    let settings: Settings = required_params(params)?;
    state.app.set_settings(settings)?;
    to_result(state.app.settings())
}

fn handle_get_feed(params: Value, state: &mut ServerState) -> MethodResult {
    let params: FeedParams = optional_params(params)?;
    to_result(state.app.filter_feed(params.filter))
}

fn handle_toggle_like(params: Value, state: &mut ServerState) -> MethodResult {
    let params: FeedItemParams = required_params(params)?;
    let item = state.app.toggle_like(&params.id)?;
    Ok(serde_json::json!({
        "item": item,
        "liked": state.app.feed().is_liked(&params.id),
    }))
}

fn handle_save_from_feed(params: Value, state: &mut ServerState) -> MethodResult {
    let params: FeedItemParams = required_params(params)?;
    let saved = state.app.save_from_feed(&params.id)?;
    to_result(saved)
}

async fn handle_connect_wearable(state: &mut ServerState) -> MethodResult {
    let delay = state.config.wearable_delay();
    let wearable = state.app.connect_wearable(delay).await;
    to_result(wearable)
}

/// Parses params that must be present.
fn required_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

/// Parses params that may be omitted entirely.
fn optional_params<T: DeserializeOwned + Default>(params: Value) -> Result<T, JsonRpcError> {
    if params.is_null() {
        return Ok(T::default());
    }
    required_params(params)
}

fn to_result<T: Serialize>(value: T) -> MethodResult {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::internal_error(format!("Failed to serialize result: {}", e)))
}
