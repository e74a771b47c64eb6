//! Anthropic Messages API client for transcript analysis.
//!
//! This module provides the production [`CompletionClient`] used by the
//! analyzer. One call to [`AnthropicClient::complete`] issues exactly one
//! `POST /messages` request; there is no retry and no streaming.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use async_trait::async_trait;
use log::*;
use meeting_ai::{Completion, CompletionClient, CompletionRequest, ContentBlock};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use service::config::Config;

/// API version pinned in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const PROVIDER_ID: &str = "anthropic";

/// Request body for `POST /messages`
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from `POST /messages`, reduced to the parts we read
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

/// A content block; only `text` blocks carry a payload we use.
#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl From<ResponseBlock> for ContentBlock {
    fn from(block: ResponseBlock) -> Self {
        match block.text {
            Some(text) if block.kind == "text" => ContentBlock::Text { text },
            _ => ContentBlock::Other { kind: block.kind },
        }
    }
}

/// Anthropic API client
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Create a new Anthropic client from configuration.
    ///
    /// Fails with `MissingCredential` when no API key is configured and with an
    /// internal error when the key cannot be sent as a header value, so the binary
    /// refuses to start in both cases.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = SecretString::new(config.claude_api_key().ok_or_else(|| {
            warn!("Failed to get Claude API key from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::MissingCredential),
            }
        })?);

        let mut headers = HeaderMap::new();

        let mut key_value = HeaderValue::from_str(api_key.expose_secret()).map_err(|e| {
            warn!("Failed to create x-api-key header: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid API key format".to_string(),
                )),
            }
        })?;
        key_value.set_sensitive(true);
        headers.insert("x-api-key", key_value);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.claude_base_url().to_string(),
            model: config.claude_model().to_string(),
            max_tokens: config.claude_max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, meeting_ai::Error> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(meeting_ai::Error::MissingCredential);
        }

        let url = format!("{}/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &request.system,
            messages: vec![Message {
                role: "user",
                content: &request.user_message,
            }],
        };

        debug!(
            "Calling Anthropic messages API with model {} ({} chars of input)",
            self.model,
            request.user_message.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach Anthropic API: {:?}", e);
                meeting_ai::Error::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Anthropic API: {} - {}", status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    meeting_ai::Error::Authentication(format!("{status}"))
                }
                _ => meeting_ai::Error::Provider(format!("{status}: {error_text}")),
            });
        }

        let messages: MessagesResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Anthropic response: {:?}", e);
            meeting_ai::Error::Deserialization(e.to_string())
        })?;

        debug!(
            "Anthropic completion returned {} content block(s), stop reason {:?}",
            messages.content.len(),
            messages.stop_reason
        );

        Ok(Completion {
            content: messages.content.into_iter().map(Into::into).collect(),
        })
    }

    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }
}
