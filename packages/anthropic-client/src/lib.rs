//! Pure Anthropic Messages REST API client
//!
//! A small client for the Anthropic Messages API with no domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_client::{AnthropicClient, Message, MessagesRequest};
//!
//! let client = AnthropicClient::from_env()?;
//!
//! let response = client
//!     .messages(
//!         MessagesRequest::new("claude-sonnet-4-5-20250929")
//!             .max_tokens(1024)
//!             .message(Message::user("Hello!")),
//!     )
//!     .await?;
//! println!("{}", response.content);
//! ```

pub mod error;
pub mod types;

pub use error::{AnthropicError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Upper bound on a single Messages call, long generations included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Pure Anthropic API client.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new client with the given API key and the default timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnthropicError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AnthropicError::Config("ANTHROPIC_API_KEY not set".into()))?;
        Self::new(api_key)
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a message.
    ///
    /// Text blocks of the reply are concatenated; non-text blocks are ignored.
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        if request.messages.is_empty() {
            return Err(AnthropicError::Config(
                "Messages request needs at least one message".into(),
            ));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Anthropic request failed");
                AnthropicError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<types::ErrorEnvelope>(&error_text)
                .map(|envelope| format!("{}: {}", envelope.error.error_type, envelope.error.message))
                .unwrap_or(error_text);
            warn!(status = %status, error = %message, "Anthropic API error");
            return Err(AnthropicError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: types::MessagesResponseRaw = response
            .json()
            .await
            .map_err(|e| AnthropicError::Parse(e.to_string()))?;

        let content = raw
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() {
            return Err(AnthropicError::Parse(
                "Response contained no text content".into(),
            ));
        }

        debug!(
            model = %raw.model,
            input_tokens = raw.usage.input_tokens,
            output_tokens = raw.usage.output_tokens,
            duration_ms = start.elapsed().as_millis(),
            "Anthropic message created"
        );

        Ok(MessagesResponse {
            content,
            model: raw.model,
            stop_reason: raw.stop_reason,
            usage: raw.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_messages_concatenates_text_blocks() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/messages")
                    .header("x-api-key", "test-key")
                    .header("anthropic-version", API_VERSION);
                then.status(200).json_body(serde_json::json!({
                    "id": "msg_1",
                    "type": "message",
                    "role": "assistant",
                    "model": "claude-test",
                    "content": [
                        {"type": "text", "text": "Hello, "},
                        {"type": "text", "text": "world"}
                    ],
                    "stop_reason": "end_turn",
                    "usage": {"input_tokens": 10, "output_tokens": 4}
                }));
            })
            .await;

        let client = AnthropicClient::new("test-key")
            .unwrap()
            .with_base_url(server.base_url());
        let response = client
            .messages(MessagesRequest::new("claude-test").message(Message::user("hi")))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "Hello, world");
        assert_eq!(response.usage.total(), 14);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/messages");
                then.status(529).json_body(serde_json::json!({
                    "type": "error",
                    "error": {"type": "overloaded_error", "message": "Overloaded"}
                }));
            })
            .await;

        let client = AnthropicClient::new("test-key")
            .unwrap()
            .with_base_url(server.base_url());
        let err = client
            .messages(MessagesRequest::new("claude-test").message(Message::user("hi")))
            .await
            .unwrap_err();

        match err {
            AnthropicError::Api { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "overloaded_error: Overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_request_rejected_locally() {
        let client = AnthropicClient::new("test-key").unwrap();
        let err = client
            .messages(MessagesRequest::new("claude-test"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnthropicError::Config(_)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/messages");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(serde_json::json!({}));
            })
            .await;

        let client = AnthropicClient::with_timeout("test-key", Duration::from_millis(50))
            .unwrap()
            .with_base_url(server.base_url());
        let err = client
            .messages(MessagesRequest::new("claude-test").message(Message::user("hi")))
            .await
            .unwrap_err();
        assert!(matches!(err, AnthropicError::Network(_)));
    }
}
