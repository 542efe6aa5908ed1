//! OpenAI provider implementation
//!
//! Supports OpenAI API and OpenAI-compatible APIs (OpenRouter, OneAPI, etc.)

use crate::error::{DomainScoutError, Result};
use crate::llm::LlmProvider;
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::status_error;

/// OpenAI provider implementation
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DomainScoutError::config("OpenAI API key is required"));
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
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: config.temperature,
        })
    }

    /// Append `/v1` unless the base URL already ends with it
    fn build_url(&self, endpoint: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.ends_with("/v1") {
            format!("{}{}", base_url, endpoint)
        } else {
            format!("{}/v1{}", base_url, endpoint)
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: 500,
        };

        let url = self.build_url("/chat/completions");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainScoutError::llm_provider("openai", format!("Failed to connect to API: {}", e), None)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error("openai", status, &error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainScoutError::parse(e.to_string(), None))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainScoutError::llm_provider("openai", "Response contained no choices", None))
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn provider(base_url: String) -> OpenAiProvider {
        OpenAiProvider::new(&LlmConfig {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: "sk-test".to_string(),
            base_url: Some(base_url),
            temperature: 0.7,
        })
        .unwrap()
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            provider("https://api.openai.com/v1/".to_string()).build_url("/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            provider("https://openrouter.ai/api".to_string()).build_url("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("Authorization", "Bearer sk-test");
                then.status(200).json_body(serde_json::json!({
                    "choices": [{ "message": { "role": "assistant", "content": "brightly.com\nnimbo.io" } }]
                }));
            })
            .await;

        let text = provider(server.base_url())
            .complete("system", "prompt")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "brightly.com\nnimbo.io");
    }

    #[tokio::test]
    async fn test_quota_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(429).body("quota");
            })
            .await;

        let err = provider(server.base_url())
            .complete("system", "prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainScoutError::LlmProvider { .. }));
    }
}
