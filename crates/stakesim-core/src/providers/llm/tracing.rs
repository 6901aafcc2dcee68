use crate::model::LlmResponse;
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Decorator that records each evaluation call in a `llm.request` span.
///
/// Prompt text is never recorded, only its length.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&[String]>,
    ) -> anyhow::Result<LlmResponse> {
        let span = info_span!(
            "llm.request",
            "llm.provider" = self.inner.provider_name(),
            "llm.prompt_chars" = prompt.len(),
            "llm.model" = tracing::field::Empty,
            "llm.duration_ms" = tracing::field::Empty,
            "llm.usage.input_tokens" = tracing::field::Empty,
            "llm.usage.output_tokens" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete(prompt, system).await;

            let span = tracing::Span::current();
            span.record("llm.duration_ms", start.elapsed().as_millis() as u64);

            match &result {
                Ok(resp) => {
                    span.record("llm.model", resp.model.as_str());
                    if let Some(usage) = resp.meta.get("usage") {
                        if let Some(i) = usage.get("input_tokens").and_then(|v| v.as_u64()) {
                            span.record("llm.usage.input_tokens", i);
                        }
                        if let Some(o) = usage.get("output_tokens").and_then(|v| v.as_u64()) {
                            span.record("llm.usage.output_tokens", o);
                        }
                    }
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                    tracing::warn!(error = %e, "evaluation call failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn fingerprint(&self) -> Option<String> {
        self.inner.fingerprint()
    }
}
