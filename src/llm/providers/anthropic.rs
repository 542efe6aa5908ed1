//! Anthropic provider implementation

use crate::error::{DomainScoutError, Result};
use crate::llm::LlmProvider;
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::status_error;

/// Anthropic provider implementation
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DomainScoutError::config("Anthropic API key is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainScoutError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string()),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: 500,
        };

        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainScoutError::llm_provider(
                    "anthropic",
                    format!("Failed to connect to Anthropic API: {}", e),
                    None,
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error("anthropic", status, &error_text));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainScoutError::parse(e.to_string(), None))?;

        let text: Vec<String> = messages_response
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(DomainScoutError::llm_provider(
                "anthropic",
                "Response contained no text blocks",
                None,
            ));
        }

        Ok(text.join("\n"))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
