//! Chat-completions client for the Hugging Face inference router.

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::error::{BotError, Result};
use crate::types::MessageRole;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Sends one chat completion per query. Holds no per-request state.
pub struct InferenceClient {
    client: reqwest::Client,
    api_url: Url,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl InferenceClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BotError::InvalidConfig {
                name: "HTTP client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.hf_token.clone(),
            model: config.model.clone(),
            timeout: config.request_timeout,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Wrap `query` verbatim as a single user message.
    #[must_use]
    pub fn build_request(&self, query: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![Message {
                role: MessageRole::User,
                content: query.to_string(),
            }],
            model: self.model.clone(),
        }
    }

    /// Ask the model and return its raw content, reasoning segment included.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::RequestFailed`] on network failure, timeout or a
    /// non-success status, and [`BotError::InvalidResponse`] when the body
    /// has no `choices[0].message.content`.
    pub async fn infer(&self, query: &str) -> Result<String> {
        debug!(
            "Sending {} character query to {} using model {}",
            query.chars().count(),
            self.api_url,
            self.model
        );

        let request = self.build_request(query);

        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let detail = if e.is_timeout() {
                    format!("request timed out after {} seconds", self.timeout.as_secs_f32())
                } else {
                    e.to_string()
                };
                warn!("Inference request failed: {detail}");
                BotError::RequestFailed {
                    status: None,
                    detail,
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read inference response body ({status}): {e}");
            BotError::RequestFailed {
                status: Some(status),
                detail: format!("failed to read response body: {e}"),
            }
        })?;
        debug!(
            "Inference API responded {status} with {} byte body",
            body.len()
        );

        if !status.is_success() {
            warn!("Inference API error ({status}): {body}");
            return Err(BotError::RequestFailed {
                status: Some(status),
                detail: body,
            });
        }

        parse_content(&body)
    }
}

/// Extract `choices[0].message.content` from a response body.
fn parse_content(body: &str) -> Result<String> {
    let api_response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        warn!("Malformed inference response: {e}");
        BotError::InvalidResponse(e.to_string())
    })?;

    let message = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BotError::InvalidResponse("No choices in response".to_string()))?
        .message;

    message
        .content
        .ok_or_else(|| BotError::InvalidResponse("No content in response message".to_string()))
}
