//! HTTP client for the remote text-completion service.
//!
//! One POST per call, no retries. Every failure is logged with its error
//! code and reported to the caller as "no content".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DaemonConfig;
use crate::error::{DaemonError, Result};

/// Source of raw completion text.
///
/// `None` means the service produced nothing usable; callers treat it the
/// same as an empty reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one system/user message pair and returns the raw reply text.
    async fn complete(&self, system: &str, prompt: &str) -> Option<String>;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Box<T> {
    async fn complete(&self, system: &str, prompt: &str) -> Option<String> {
        (**self).complete(system, prompt).await
    }
}

/// Request body: role-tagged messages, system first.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum Message<'a> {
    System { content: &'a str },
    User { content: Vec<ContentPart<'a>> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPart<'a> {
    Text { text: &'a str },
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}

/// reqwest-backed [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: Client,
    url: String,
}

impl HttpCompletionClient {
    /// Creates a client for the given endpoint with a request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("moodtunes-daemon/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DaemonError::http_client_init_failed)?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Creates a client from the daemon configuration.
    pub fn from_config(config: &DaemonConfig) -> Result<Self> {
        Self::new(config.completion_url.clone(), config.request_timeout())
    }

    /// Returns the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs the request, keeping the failure reason.
    async fn request(&self, system: &str, prompt: &str) -> Result<String> {
        let body = CompletionRequest {
            messages: vec![
                Message::System { content: system },
                Message::User {
                    content: vec![ContentPart::Text { text: prompt }],
                },
            ],
        };

        debug!(url = %self.url, prompt_len = prompt.len(), "Sending completion request");

        let response = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(DaemonError::completion_request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DaemonError::completion_http_status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(DaemonError::completion_request_failed)?;

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| DaemonError::completion_response_invalid(e.to_string()))?;

        debug!(completion_len = parsed.completion.len(), "Completion received");
        Ok(parsed.completion)
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, system: &str, prompt: &str) -> Option<String> {
        match self.request(system, prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(code = %e.code, error = %e.message, "Completion request failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = CompletionRequest {
            messages: vec![
                Message::System { content: "sys" },
                Message::User {
                    content: vec![ContentPart::Text { text: "hello" }],
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": [{ "type": "text", "text": "hello" }] }
                ]
            })
        );
    }

    #[test]
    fn response_requires_completion_string() {
        assert!(serde_json::from_str::<CompletionResponse>(r#"{"completion":"x"}"#).is_ok());
        assert!(serde_json::from_str::<CompletionResponse>(r#"{"completion":5}"#).is_err());
        assert!(serde_json::from_str::<CompletionResponse>(r#"{"text":"x"}"#).is_err());
    }

    #[test]
    fn client_from_default_config() {
        let client = HttpCompletionClient::from_config(&DaemonConfig::default()).unwrap();
        assert_eq!(client.url(), crate::config::DEFAULT_COMPLETION_URL);
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_none() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client =
            HttpCompletionClient::new("http://127.0.0.1:9/text/llm/", Duration::from_secs(2))
                .unwrap();
        assert!(client.complete("sys", "prompt").await.is_none());
    }
}
