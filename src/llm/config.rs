//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API (default)
    #[default]
    OpenAI,
    /// Ollama API (local inference)
    Ollama,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "groq" | "together" => Some(Self::OpenAI),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}

/// Configuration for the LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether LLM-backed endpoints are enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// LLM provider (openai or ollama)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API endpoint (provider-specific defaults apply)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key for OpenAI-compatible providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum characters of record context to send to the LLM
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-5.1".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_content_chars() -> usize {
    12000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars: `LLM_ENABLED`, `LLM_PROVIDER`, `LLM_ENDPOINT`,
    /// `LLM_MODEL`, and `OPENAI_API_KEY` / `LLM_API_KEY`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(enabled) = std::env::var("LLM_ENABLED") {
            self.enabled = matches!(enabled.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(provider) = std::env::var("LLM_PROVIDER")
            .ok()
            .and_then(|s| LlmProvider::from_str(&s))
        {
            self.provider = provider;
            if provider == LlmProvider::Ollama && self.endpoint == default_endpoint() {
                self.endpoint = "http://localhost:11434".to_string();
            }
        }
        if let Ok(endpoint) = std::env::var("LLM_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.model = model;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY").or_else(|_| std::env::var("LLM_API_KEY"))
        {
            self.api_key = Some(key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert!(config.enabled);
        assert_eq!(config.provider, LlmProvider::OpenAI);
        assert!(config.endpoint.contains("api.openai.com"));
    }

    #[test]
    fn test_provider_aliases() {
        assert_eq!(LlmProvider::from_str("groq"), Some(LlmProvider::OpenAI));
        assert_eq!(LlmProvider::from_str("Ollama"), Some(LlmProvider::Ollama));
        assert_eq!(LlmProvider::from_str("unknown"), None);
    }
}
