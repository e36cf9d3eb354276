//! Claude Messages API client.

use serde::{Deserialize, Serialize};

use crate::config::ClaudeConfig;
use crate::dialogue::{ChatService, Session, Turn};
use crate::error::GenerationError;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct Claude {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Turn],
}

#[derive(Deserialize)]
struct ChatResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

impl Claude {
    /// Create a Claude client from config.
    ///
    /// # Errors
    ///
    /// Returns `CredentialMissing` if no API key is configured. No request
    /// is made in that case.
    pub fn from_config(config: &ClaudeConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(GenerationError::CredentialMissing)?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

impl ChatService for Claude {
    async fn reply(&self, system: &str, session: &Session) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: session.turns(),
        };

        tracing::debug!("Calling Claude ({}) with {} turns", self.model, session.turns().len());

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Service(api_error_message(status, &body)));
        }

        parse_reply(&body)
    }
}

fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiError>(body).map_or_else(
        |_| format!("{status}: {body}"),
        |api_error| api_error.error.message,
    )
}

/// Join the text blocks of a Messages API response.
fn parse_reply(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Service(format!("Failed to parse Claude response: {e}")))?;

    if response.stop_reason.as_deref() == Some("max_tokens") {
        tracing::warn!("Claude reply was cut off at max_tokens");
    }

    let text: Vec<String> = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect();

    if text.is_empty() {
        return Err(GenerationError::Service("No text in Claude response".to_string()));
    }

    Ok(text.join("\n"))
}
