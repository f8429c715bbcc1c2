//! JSON-RPC types for the daemon protocol.
//!
//! Envelope types follow JSON-RPC 2.0; parameter types mirror the state
//! operations exposed to the front end.

use serde::{Deserialize, Serialize};

use crate::error::{DaemonError, ErrorCode};
use crate::types::{Emoji, FeedFilter, MoodInput, Playlist};

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Integer(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

/// A JSON-RPC request wrapper.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: RequestId,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC response wrapper.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: T,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error,
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRpcErrorData>,
}

/// Extended error data for application-specific errors.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorData {
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonRpcError {
    /// Creates a parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::plain(-32700, message)
    }

    /// Creates an invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::plain(-32600, message)
    }

    /// Creates a method not found error (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self::plain(-32601, format!("Method not found: {}", method))
    }

    /// Creates an invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::plain(-32602, message)
    }

    /// Creates an internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::plain(-32603, message)
    }

    /// Creates an invalid mood error (-32000).
    pub fn invalid_mood(details: impl Into<String>) -> Self {
        Self::application(-32000, "Invalid mood", ErrorCode::InvalidMood, details)
    }

    /// Creates a feed item not found error (-32001).
    pub fn feed_item_not_found(details: impl Into<String>) -> Self {
        Self::application(
            -32001,
            "Feed item not found",
            ErrorCode::FeedItemNotFound,
            details,
        )
    }

    /// Creates a storage failure error (-32002).
    pub fn storage_failed(code: ErrorCode, details: impl Into<String>) -> Self {
        Self::application(-32002, "Storage failure", code, details)
    }

    fn plain(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    fn application(
        code: i32,
        message: &str,
        error_code: ErrorCode,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: Some(JsonRpcErrorData {
                error_code: error_code.as_str().to_string(),
                details: Some(details.into()),
            }),
        }
    }
}

impl From<DaemonError> for JsonRpcError {
    fn from(err: DaemonError) -> Self {
        match err.code {
            ErrorCode::InvalidMood => JsonRpcError::invalid_mood(err.message),
            ErrorCode::FeedItemNotFound => JsonRpcError::feed_item_not_found(err.message),
            ErrorCode::StorageReadFailed | ErrorCode::StorageWriteFailed => {
                JsonRpcError::storage_failed(err.code, err.message)
            }
            _ => JsonRpcError::internal_error(err.to_string()),
        }
    }
}

// ============================================================================
// Method parameters
// ============================================================================

/// Parameters for `generate_playlist`. Without a mood, the current one is used.
#[derive(Debug, Default, Deserialize)]
pub struct GeneratePlaylistParams {
    #[serde(default)]
    pub mood: Option<MoodInput>,
}

/// Parameters for `set_quick_mood`.
#[derive(Debug, Default, Deserialize)]
pub struct QuickMoodParams {
    #[serde(default)]
    pub emoji: Option<Emoji>,
}

/// Parameters for `save_playlist`. Without a playlist, the current one is saved.
#[derive(Debug, Default, Deserialize)]
pub struct SavePlaylistParams {
    #[serde(default)]
    pub playlist: Option<Playlist>,
}

/// Parameters for `get_feed`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub filter: FeedFilter,
}

/// Parameters for `toggle_like` and `save_from_feed`.
#[derive(Debug, Deserialize)]
pub struct FeedItemParams {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_from_int() {
        let id: RequestId = 42.into();
        assert_eq!(id, RequestId::Integer(42));
    }

    #[test]
    fn request_id_from_string() {
        let id: RequestId = "abc".to_string().into();
        assert_eq!(id, RequestId::String("abc".to_string()));
    }

    #[test]
    fn json_rpc_error_codes() {
        assert_eq!(JsonRpcError::parse_error("").code, -32700);
        assert_eq!(JsonRpcError::invalid_request("").code, -32600);
        assert_eq!(JsonRpcError::method_not_found("").code, -32601);
        assert_eq!(JsonRpcError::invalid_params("").code, -32602);
        assert_eq!(JsonRpcError::internal_error("").code, -32603);
        assert_eq!(JsonRpcError::invalid_mood("").code, -32000);
        assert_eq!(JsonRpcError::feed_item_not_found("").code, -32001);
        assert_eq!(
            JsonRpcError::storage_failed(ErrorCode::StorageWriteFailed, "").code,
            -32002
        );
    }

    #[test]
    fn daemon_errors_map_to_application_codes() {
        let err: JsonRpcError = DaemonError::feed_item_not_found("f9").into();
        assert_eq!(err.code, -32001);
        assert_eq!(err.data.unwrap().error_code, "FEED_ITEM_NOT_FOUND");

        let err: JsonRpcError = DaemonError::invalid_mood("bad").into();
        assert_eq!(err.code, -32000);

        let err: JsonRpcError = DaemonError::completion_http_status(502).into();
        assert_eq!(err.code, -32603);
    }

    #[test]
    fn feed_params_default_filter() {
        let params: FeedParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.filter, FeedFilter::All);
        let params: FeedParams =
            serde_json::from_value(serde_json::json!({ "filter": "calm" })).unwrap();
        assert_eq!(params.filter, FeedFilter::Calm);
    }

    #[test]
    fn generate_params_accept_mood() {
        let params: GeneratePlaylistParams = serde_json::from_value(serde_json::json!({
            "mood": { "emoji": "😡", "energy": 90, "valence": 10 }
        }))
        .unwrap();
        let mood = params.mood.unwrap();
        assert_eq!(mood.emoji, Some(Emoji::Angry));
        assert_eq!(mood.energy, 90);
    }
}
