//! HTTP client for the Anthropic Messages API.
//!
//! Wraps `reqwest` with typed request/response structs, API key management,
//! and a bounded request timeout. One call per generation: failures are
//! surfaced to the caller as [`CopyError`]s and never retried here.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::CopyError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Client for the ad copy generation API.
///
/// Manages the HTTP client, API key, model name, and endpoint URL. Use
/// [`CopyClient::new`] for production or [`CopyClient::with_base_url`] to
/// point at a mock server in tests.
pub struct CopyClient {
    client: Client,
    api_key: String,
    model: String,
    messages_url: Url,
}

impl CopyClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, CopyError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CopyError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CopyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("adsmith/0.1 (ad-generation)")
            .build()?;

        // Normalise the trailing slash so the endpoint join keeps the full
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let messages_url = Url::parse(&normalised)
            .and_then(|base| base.join("v1/messages"))
            .map_err(|e| CopyError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            messages_url,
        })
    }

    /// Generates ad text for `prompt` and returns the raw response text.
    ///
    /// Sends one `POST /v1/messages` call with the configured model and the
    /// caller's token cap and temperature; the first `text` content block of
    /// the response is the generated text.
    ///
    /// # Errors
    ///
    /// - [`CopyError::Api`] on a non-2xx response.
    /// - [`CopyError::Http`] on network failure or timeout.
    /// - [`CopyError::Deserialize`] if the response body does not match the
    ///   expected shape.
    /// - [`CopyError::NoTextContent`] if the response carries no `text`
    ///   content block.
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, CopyError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            temperature,
            messages: vec![Message {
                role: "user",
                content: format!("\n\nHuman: {prompt}\n\nAssistant:"),
            }],
        };

        let response = self
            .client
            .post(self.messages_url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body);
            return Err(CopyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| CopyError::Deserialize {
                context: "v1/messages".to_string(),
                source: e,
            })?;

        let text = parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(CopyError::NoTextContent)?;

        tracing::debug!(model = %self.model, chars = text.len(), "generation response received");
        Ok(text)
    }
}

/// Pulls the human-readable message out of an API error body, falling back
/// to the raw body when it is not the documented error envelope.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_url_normalises_trailing_slash() {
        let client = CopyClient::with_base_url("key", "model", 30, "http://localhost:9999/")
            .expect("client construction should not fail");
        assert_eq!(
            client.messages_url.as_str(),
            "http://localhost:9999/v1/messages"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = CopyClient::with_base_url("key", "model", 30, "not a url");
        assert!(
            matches!(result, Err(CopyError::InvalidBaseUrl { .. })),
            "expected InvalidBaseUrl"
        );
    }

    #[test]
    fn api_error_message_prefers_the_error_envelope() {
        let body = r#"{"type":"error","error":{"type":"invalid_request_error","message":"max_tokens required"}}"#;
        assert_eq!(api_error_message(body), "max_tokens required");
        assert_eq!(api_error_message("plain text failure"), "plain text failure");
    }
}
