//! Error types for the moodtunes-daemon.
//!
//! Defines all error codes and types used throughout the daemon for
//! consistent error handling and reporting. Failures inside the playlist
//! pipeline never escape it; these errors cover the completion request
//! internals (logged, then collapsed) and the application-state operations.

use std::fmt;

/// Error codes returned by the daemon in error responses.
///
/// These codes are used in JSON-RPC error responses and in log records,
/// allowing clients to programmatically handle specific error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The HTTP client could not be constructed.
    /// Trigger: TLS backend initialization failure.
    HttpClientInitFailed,

    /// The completion request never produced a response.
    /// Trigger: Timeout, DNS failure, connection refused.
    CompletionRequestFailed,

    /// The completion service answered with a non-success status.
    /// Trigger: 4xx/5xx response.
    CompletionHttpStatus,

    /// The completion response body did not have the expected shape.
    /// Trigger: Non-JSON body or missing `completion` string.
    CompletionResponseInvalid,

    /// Reading a persisted blob failed.
    /// Trigger: Permission denied, unreadable store directory.
    StorageReadFailed,

    /// Writing a persisted blob failed.
    /// Trigger: Disk full, read-only store directory.
    StorageWriteFailed,

    /// Mood values are outside their valid ranges.
    /// Trigger: Energy or valence above 100, heart rate of 0.
    InvalidMood,

    /// No feed item has the requested id.
    /// Trigger: Stale id from the front end.
    FeedItemNotFound,

    /// Configuration values are outside their valid ranges.
    /// Trigger: Bad MOODTUNES_* environment variable or CLI override.
    ConfigInvalid,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::HttpClientInitFailed => "HTTP_CLIENT_INIT_FAILED",
            ErrorCode::CompletionRequestFailed => "COMPLETION_REQUEST_FAILED",
            ErrorCode::CompletionHttpStatus => "COMPLETION_HTTP_STATUS",
            ErrorCode::CompletionResponseInvalid => "COMPLETION_RESPONSE_INVALID",
            ErrorCode::StorageReadFailed => "STORAGE_READ_FAILED",
            ErrorCode::StorageWriteFailed => "STORAGE_WRITE_FAILED",
            ErrorCode::InvalidMood => "INVALID_MOOD",
            ErrorCode::FeedItemNotFound => "FEED_ITEM_NOT_FOUND",
            ErrorCode::ConfigInvalid => "CONFIG_INVALID",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::HttpClientInitFailed => "Failed to build the HTTP client",
            ErrorCode::CompletionRequestFailed => "Completion request did not complete",
            ErrorCode::CompletionHttpStatus => "Completion service returned an error status",
            ErrorCode::CompletionResponseInvalid => "Completion response had an unexpected shape",
            ErrorCode::StorageReadFailed => "Failed to read from the key-value store",
            ErrorCode::StorageWriteFailed => "Failed to write to the key-value store",
            ErrorCode::InvalidMood => "Mood values are out of range",
            ErrorCode::FeedItemNotFound => "Feed item not found",
            ErrorCode::ConfigInvalid => "Invalid configuration",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::HttpClientInitFailed => {
                "Check the system TLS configuration and restart the daemon"
            }
            ErrorCode::CompletionRequestFailed => {
                "Check internet connection or point MOODTUNES_COMPLETION_URL at a reachable endpoint"
            }
            ErrorCode::CompletionHttpStatus => {
                "The completion service may be overloaded; regenerate the playlist later"
            }
            ErrorCode::CompletionResponseInvalid => {
                "Verify MOODTUNES_COMPLETION_URL points at a text completion endpoint"
            }
            ErrorCode::StorageReadFailed => {
                "Check permissions of the data directory (MOODTUNES_DATA_PATH)"
            }
            ErrorCode::StorageWriteFailed => {
                "Check free disk space and permissions of the data directory (MOODTUNES_DATA_PATH)"
            }
            ErrorCode::InvalidMood => {
                "Energy and valence must be between 0 and 100, heart rate must be positive"
            }
            ErrorCode::FeedItemNotFound => "Refresh the feed and retry with a listed id",
            ErrorCode::ConfigInvalid => "Fix the MOODTUNES_* environment variables or CLI flags",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for daemon operations.
#[derive(Debug)]
pub struct DaemonError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DaemonError {
    /// Creates a new DaemonError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new DaemonError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an HTTP_CLIENT_INIT_FAILED error.
    pub fn http_client_init_failed(source: reqwest::Error) -> Self {
        Self::with_source(
            ErrorCode::HttpClientInitFailed,
            format!("Failed to create HTTP client: {}", source),
            source,
        )
    }

    /// Creates a COMPLETION_REQUEST_FAILED error.
    pub fn completion_request_failed(source: reqwest::Error) -> Self {
        let reason = if source.is_timeout() {
            "timed out"
        } else if source.is_connect() {
            "connection failed"
        } else {
            "transport error"
        };
        Self::with_source(
            ErrorCode::CompletionRequestFailed,
            format!("Completion request {}: {}", reason, source),
            source,
        )
    }

    /// Creates a COMPLETION_HTTP_STATUS error.
    pub fn completion_http_status(status: u16) -> Self {
        Self::new(
            ErrorCode::CompletionHttpStatus,
            format!("Completion service returned HTTP {}", status),
        )
    }

    /// Creates a COMPLETION_RESPONSE_INVALID error.
    pub fn completion_response_invalid(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::CompletionResponseInvalid,
            format!("Invalid completion response: {}", reason.into()),
        )
    }

    /// Creates a STORAGE_READ_FAILED error.
    pub fn storage_read_failed(key: &str, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::StorageReadFailed,
            format!("Failed to read key {}: {}", key, source),
            source,
        )
    }

    /// Creates a STORAGE_WRITE_FAILED error.
    pub fn storage_write_failed(key: &str, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::StorageWriteFailed,
            format!("Failed to write key {}: {}", key, source),
            source,
        )
    }

    /// Creates an INVALID_MOOD error.
    pub fn invalid_mood(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMood, reason)
    }

    /// Creates a FEED_ITEM_NOT_FOUND error.
    pub fn feed_item_not_found(id: &str) -> Self {
        Self::new(
            ErrorCode::FeedItemNotFound,
            format!("No feed item with id {}", id),
        )
    }

    /// Creates a CONFIG_INVALID error.
    pub fn config_invalid(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, reason)
    }
}

impl fmt::Display for DaemonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for DaemonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using DaemonError.
pub type Result<T> = std::result::Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CODES: [ErrorCode; 9] = [
        ErrorCode::HttpClientInitFailed,
        ErrorCode::CompletionRequestFailed,
        ErrorCode::CompletionHttpStatus,
        ErrorCode::CompletionResponseInvalid,
        ErrorCode::StorageReadFailed,
        ErrorCode::StorageWriteFailed,
        ErrorCode::InvalidMood,
        ErrorCode::FeedItemNotFound,
        ErrorCode::ConfigInvalid,
    ];

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::CompletionHttpStatus.as_str(), "COMPLETION_HTTP_STATUS");
        assert_eq!(ErrorCode::StorageWriteFailed.as_str(), "STORAGE_WRITE_FAILED");
        assert_eq!(ErrorCode::InvalidMood.as_str(), "INVALID_MOOD");
        assert_eq!(ErrorCode::FeedItemNotFound.as_str(), "FEED_ITEM_NOT_FOUND");
    }

    #[test]
    fn error_code_texts_not_empty() {
        for code in ALL_CODES {
            assert!(!code.description().is_empty(), "{}", code);
            assert!(!code.recovery_hint().is_empty(), "{}", code);
        }
    }

    #[test]
    fn daemon_error_display() {
        let err = DaemonError::completion_http_status(500);
        let text = err.to_string();
        assert!(text.contains("COMPLETION_HTTP_STATUS"));
        assert!(text.contains("500"));
        assert!(text.contains("Recovery:"));
    }

    #[test]
    fn storage_error_keeps_source() {
        use std::error::Error;
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DaemonError::storage_write_failed("@moodtunes:saved", io);
        assert_eq!(err.code, ErrorCode::StorageWriteFailed);
        assert!(err.source().is_some());
        assert!(err.message.contains("@moodtunes:saved"));
    }
}
