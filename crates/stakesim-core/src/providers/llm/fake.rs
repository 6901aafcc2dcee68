use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;

/// Deterministic stand-in for offline runs and tests.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    fixed_response: Option<String>,
}

impl FakeClient {
    pub fn new(model: String) -> Self {
        Self {
            model,
            fixed_response: None,
        }
    }

    pub fn with_response(mut self, response: String) -> Self {
        self.fixed_response = Some(response);
        self
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(
        &self,
        _prompt: &str,
        _system: Option<&[String]>,
    ) -> anyhow::Result<LlmResponse> {
        let text = self
            .fixed_response
            .clone()
            .ok_or_else(|| anyhow::anyhow!("fake provider has no canned response configured"))?;

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
