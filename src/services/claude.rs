use std::time::Duration;

use async_trait::async_trait;

use super::generation::{GenerationError, TextGenerator};
use crate::config::Config;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const TOKENS_PER_ITEM: usize = 120;

/// Claude Messages API client used for suggestion generation.
pub struct ClaudeClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ClaudeClient {
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: MESSAGES_URL.to_string(),
            api_key: config.claude_api_key.clone(),
            model: config.claude_model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, prompt: &str, max_items: usize) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": TOKENS_PER_ITEM * max_items.max(1),
                "messages": [{
                    "role": "user",
                    "content": prompt
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        extract_text(&body)
    }
}

/// Concatenates the text blocks of a Messages API response.
fn extract_text(body: &serde_json::Value) -> Result<String, GenerationError> {
    let blocks = body["content"]
        .as_array()
        .ok_or_else(|| GenerationError::Malformed("missing content array".into()))?;

    let text: Vec<&str> = blocks
        .iter()
        .filter(|block| block["type"] == "text")
        .filter_map(|block| block["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(GenerationError::Malformed("no text blocks in response".into()));
    }
    Ok(text.join("\n"))
}
