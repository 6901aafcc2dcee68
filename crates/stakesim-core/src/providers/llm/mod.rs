pub mod anthropic;
pub mod fake;
pub mod tracing;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{GradingConfig, PROVIDER_ANTHROPIC, PROVIDER_FAKE};
use crate::errors::{GradingError, GradingResult};
use crate::model::LlmResponse;

/// Text-generation service used for evaluation calls.
///
/// Implementations hold their own sampling parameters; callers pass only the
/// prompt and optional system instructions.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, system: Option<&[String]>)
        -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;

    /// Stable description of model + sampling parameters, if known.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

/// Construct the configured client, wrapped in [`tracing::TracingLlmClient`].
pub fn build_client(config: &GradingConfig) -> GradingResult<Arc<dyn LlmClient>> {
    let inner: Arc<dyn LlmClient> = match config.provider.as_str() {
        PROVIDER_ANTHROPIC => Arc::new(anthropic::AnthropicClient::from_config(config)?),
        PROVIDER_FAKE => {
            let mut client = fake::FakeClient::new(config.model.clone());
            if let Some(resp) = &config.fake_response {
                client = client.with_response(resp.clone());
            }
            Arc::new(client)
        }
        other => {
            return Err(GradingError::Config {
                message: format!("unknown provider '{}'", other),
            })
        }
    };
    Ok(Arc::new(tracing::TracingLlmClient::new(inner)))
}
