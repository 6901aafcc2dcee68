use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::LlmClient;
use crate::config::GradingConfig;
use crate::errors::{GradingError, GradingResult};
use crate::model::LlmResponse;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client.
pub struct AnthropicClient {
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(model: String, api_key: String, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model,
            api_key,
            temperature,
            max_tokens,
            base_url: "https://api.anthropic.com".to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &GradingConfig) -> GradingResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GradingError::Config {
                message: "ANTHROPIC_API_KEY not set".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GradingError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&[String]>,
    ) -> anyhow::Result<LlmResponse> {
        let url = format!("{}/v1/messages", self.base_url);

        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(system) = system.filter(|s| !s.is_empty()) {
            body["system"] = json!(system.join("\n\n"));
        }

        debug!(url = %url, model = %self.model, "sending evaluation request");
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!(
                "Anthropic messages API error (status {}): {}",
                status.as_u16(),
                error_text
            );
        }

        let json: serde_json::Value = resp.json().await?;

        let text = json
            .pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Anthropic API response missing content text"))?
            .to_string();

        let model = json
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or(self.model.as_str())
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "anthropic".to_string(),
            model,
            meta: json!({ "usage": json.get("usage").cloned().unwrap_or_default() }),
        })
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn fingerprint(&self) -> Option<String> {
        Some(format!(
            "anthropic:{}:t={}:max={}",
            self.model, self.temperature, self.max_tokens
        ))
    }
}
