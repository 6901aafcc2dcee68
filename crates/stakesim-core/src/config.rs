//! Grading configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a YAML file
//! ([`load_config`]), then environment variables.
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `STAKESIM_PROVIDER` | `anthropic` (default) or `fake` |
//! | `STAKESIM_MODEL` | Evaluation model name |
//! | `ANTHROPIC_API_KEY` | API key for the Anthropic provider |
//! | `STAKESIM_LLM_BASE_URL` | Provider base URL (default: `https://api.anthropic.com`) |
//! | `STAKESIM_MAX_TOKENS` | Maximum output tokens (default: 3000) |
//! | `STAKESIM_TEMPERATURE` | Sampling temperature (default: 0.3) |
//! | `STAKESIM_TIMEOUT_SECS` | HTTP request timeout in seconds (default: 60) |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GradingError, GradingResult};

pub const PROVIDER_ANTHROPIC: &str = "anthropic";
pub const PROVIDER_FAKE: &str = "fake";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GradingConfig {
    pub provider: String,
    pub model: String,

    /// Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub base_url: String,

    /// Fixed maximum output length of the evaluation call.
    pub max_tokens: u32,

    /// Kept low: structured output over creative variation.
    pub temperature: f32,

    pub system_prompt: String,

    pub timeout_secs: u64,

    /// Canned evaluation output for the `fake` provider.
    pub fake_response: Option<String>,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_system_prompt() -> String {
    "You are an expert evaluator. Respond only with valid JSON.".to_string()
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            provider: PROVIDER_ANTHROPIC.to_string(),
            model: default_model(),
            api_key: None,
            base_url: default_base_url(),
            max_tokens: 3000,
            temperature: 0.3,
            system_prompt: default_system_prompt(),
            timeout_secs: 60,
            fake_response: None,
        }
    }
}

impl GradingConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("STAKESIM_PROVIDER") {
            self.provider = v.to_lowercase();
        }
        if let Ok(v) = std::env::var("STAKESIM_MODEL") {
            self.model = v;
        }
        if let Ok(v) = std::env::var("ANTHROPIC_API_KEY") {
            if !v.is_empty() {
                self.api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("STAKESIM_LLM_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = env_parse("STAKESIM_MAX_TOKENS") {
            self.max_tokens = v;
        }
        if let Some(v) = env_parse("STAKESIM_TEMPERATURE") {
            self.temperature = v;
        }
        if let Some(v) = env_parse("STAKESIM_TIMEOUT_SECS") {
            self.timeout_secs = v;
        }
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_fake_response(mut self, response: impl Into<String>) -> Self {
        self.fake_response = Some(response.into());
        self
    }

    pub fn validate(&self) -> GradingResult<()> {
        match self.provider.as_str() {
            PROVIDER_ANTHROPIC | PROVIDER_FAKE => {}
            other => {
                return Err(config_error(format!(
                    "unknown provider '{}' (expected '{}' or '{}')",
                    other, PROVIDER_ANTHROPIC, PROVIDER_FAKE
                )))
            }
        }
        if self.max_tokens == 0 {
            return Err(config_error("max_tokens must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(config_error(format!(
                "temperature {} outside 0.0..=1.0",
                self.temperature
            )));
        }
        if self.model.trim().is_empty() {
            return Err(config_error("model must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load a YAML config file and apply environment overrides.
pub fn load_config(path: &Path) -> GradingResult<GradingConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        config_error(format!("failed to read config {}: {}", path.display(), e))
    })?;
    let cfg: GradingConfig = serde_yaml::from_str(&raw)
        .map_err(|e| config_error(format!("failed to parse YAML: {}", e)))?;
    let cfg = cfg.with_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn config_error(message: String) -> GradingError {
    GradingError::Config { message }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: &[&str] = &[
        "STAKESIM_PROVIDER",
        "STAKESIM_MODEL",
        "ANTHROPIC_API_KEY",
        "STAKESIM_LLM_BASE_URL",
        "STAKESIM_MAX_TOKENS",
        "STAKESIM_TEMPERATURE",
        "STAKESIM_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for v in VARS {
            unsafe {
                std::env::remove_var(v);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let cfg = GradingConfig::from_env();
        assert_eq!(cfg.provider, "anthropic");
        assert_eq!(cfg.max_tokens, 3000);
        assert!((cfg.temperature - 0.3).abs() < f32::EPSILON);
        assert!(cfg.api_key.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("STAKESIM_PROVIDER", "FAKE");
            std::env::set_var("STAKESIM_MAX_TOKENS", "1200");
            std::env::set_var("STAKESIM_TEMPERATURE", "not-a-number");
            std::env::set_var("ANTHROPIC_API_KEY", "sk-test");
        }
        let cfg = GradingConfig::from_env();
        clear_env();

        assert_eq!(cfg.provider, "fake");
        assert_eq!(cfg.max_tokens, 1200);
        // Unparseable values fall back to the default.
        assert!((cfg.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    #[serial]
    fn test_load_config_yaml() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provider: fake\nmodel: grader-small\nmax_tokens: 500").unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.provider, "fake");
        assert_eq!(cfg.model, "grader-small");
        assert_eq!(cfg.max_tokens, 500);
        assert_eq!(cfg.base_url, "https://api.anthropic.com");
    }

    #[test]
    #[serial]
    fn test_load_config_rejects_unknown_provider() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provider: carrier-pigeon").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, GradingError::Config { .. }));
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let cfg = GradingConfig::default().with_api_key("sk-secret");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(!yaml.contains("sk-secret"));
    }
}
