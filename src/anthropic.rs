use serde::{Deserialize, Serialize};
use thiserror::Error;

const ANTHROPIC_VERSION: &str = "2023-06-01";

// Anything that goes wrong upstream. Callers collapse every variant into
// the same user-facing fallback; the detail only reaches the server log.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

// Messages API request format
#[derive(Serialize, Clone)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<OutboundMessage>,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct OutboundMessage {
    pub role: String,
    pub content: String,
}

// Messages API response format - only the content blocks matter here
#[derive(Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    // tool_use, thinking, whatever else the API grows - ignored
    #[serde(other)]
    Other,
}

// The reply shown in the widget: first content block if it is text,
// empty string otherwise
pub fn extract_text(response: &MessagesResponse) -> String {
    match response.content.first() {
        Some(ContentBlock::Text { text }) => text.clone(),
        _ => String::new(),
    }
}

pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
            max_tokens,
        }
    }

    // One awaited call per inbound request. No streaming, no retry; the
    // reqwest default timeout is inherited.
    pub async fn complete(
        &self,
        system: Option<String>,
        messages: Vec<OutboundMessage>,
    ) -> Result<String, UpstreamError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system,
            messages,
        };

        let res = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let body: MessagesResponse = res.json().await?;
        Ok(extract_text(&body))
    }
}
