//! LLM client for the assistant endpoints.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{LlmConfig, LlmProvider};
use super::prompts;

/// Assistant output while the user edits a narrative field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecommendation {
    /// Refined field value, when the answer is complete enough.
    #[serde(default)]
    pub wartosc_pola: Option<String>,
    /// Follow-up message for the user.
    #[serde(default)]
    pub wiadomosc: Option<String>,
}

/// LLM client for record drafting and review.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// OpenAI chat completions request format.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Check if the LLM backend is usable.
    pub async fn is_available(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        match self.config.provider {
            LlmProvider::OpenAI => self.config.api_key.is_some(),
            LlmProvider::Ollama => {
                let url = format!("{}/api/tags", self.config.endpoint);
                match self.client.get(&url).send().await {
                    Ok(resp) => resp.status().is_success(),
                    Err(_) => false,
                }
            }
        }
    }

    /// Refine the narrative field the user is editing.
    pub async fn field_recommendation(
        &self,
        document: &serde_json::Value,
        field_name: &str,
        history: &str,
    ) -> Result<FieldRecommendation, LlmError> {
        let context = serde_json::to_string(document).unwrap_or_default();
        let prompt = prompts::FIELD_RECOMMENDATION_PROMPT
            .replace("{document}", self.truncate_content(&context))
            .replace("{field_name}", field_name)
            .replace("{history}", history);

        debug!("Requesting field recommendation for: {}", field_name);
        let response = self.complete(&prompt).await?;
        let json = extract_json(&response)
            .ok_or_else(|| LlmError::Parse("no JSON object in response".to_string()))?;
        serde_json::from_str(json).map_err(|e| LlmError::Parse(e.to_string()))
    }

    /// Critique a submitted record the way a ZUS clerk would.
    pub async fn review_report(
        &self,
        document: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let context = serde_json::to_string(document).unwrap_or_default();
        let prompt =
            prompts::REVIEW_PROMPT.replace("{document}", self.truncate_content(&context));

        debug!("Requesting report review");
        let response = self.complete(&prompt).await?;
        let json = extract_json(&response)
            .ok_or_else(|| LlmError::Parse("no JSON object in response".to_string()))?;
        serde_json::from_str(json).map_err(|e| LlmError::Parse(e.to_string()))
    }

    /// Structure OCR text from a scanned form into record fields.
    pub async fn structure_ocr_text(&self, text: &str) -> Result<serde_json::Value, LlmError> {
        let prompt = prompts::EXTRACT_PROMPT.replace("{text}", self.truncate_content(text));

        debug!("Requesting OCR text structuring");
        let response = self.complete(&prompt).await?;
        let json = extract_json(&response)
            .ok_or_else(|| LlmError::Parse("no JSON object in response".to_string()))?;
        serde_json::from_str(json).map_err(|e| LlmError::Parse(e.to_string()))
    }

    /// Send a single-prompt completion to the configured provider.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if !self.config.enabled {
            return Err(LlmError::Disabled);
        }
        match self.config.provider {
            LlmProvider::OpenAI => self.call_openai(prompt).await,
            LlmProvider::Ollama => self.call_ollama(prompt).await,
        }
    }

    /// Truncate context to the configured maximum (UTF-8 safe).
    fn truncate_content<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.config.max_content_chars {
            return text;
        }
        let mut end = self.config.max_content_chars;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }

    async fn call_openai(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.config.endpoint);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Parse("empty choices in response".to_string()))
    }

    async fn call_ollama(&self, prompt: &str) -> Result<String, LlmError> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let ollama: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        Ok(ollama.response)
    }
}

/// Find the JSON object in an LLM response, tolerating markdown fences and
/// surrounding prose.
fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

/// Errors that can occur during LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("LLM is disabled")]
    Disabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json() {
        assert_eq!(extract_json(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
        assert_eq!(
            extract_json("Oto wynik:\n```json\n{\"a\": 1}\n```\n"),
            Some("{\"a\": 1}")
        );
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} {"), None);
    }

    #[test]
    fn test_field_recommendation_parsing() {
        let raw = "```json\n{\"wartosc_pola\": null, \"wiadomosc\": \"Podaj godzinę.\"}\n```";
        let json = extract_json(raw).unwrap();
        let rec: FieldRecommendation = serde_json::from_str(json).unwrap();
        assert!(rec.wartosc_pola.is_none());
        assert_eq!(rec.wiadomosc.as_deref(), Some("Podaj godzinę."));
    }

    #[test]
    fn test_truncate_content_respects_char_boundaries() {
        let mut config = LlmConfig::default();
        config.max_content_chars = 5;
        let client = LlmClient::new(config);

        // "łó" is 4 bytes; cutting at 5 would split the second 'ó'
        let text = "łółół";
        let truncated = client.truncate_content(text);
        assert!(truncated.len() <= 5);
        assert!(text.starts_with(truncated));
    }

    #[tokio::test]
    async fn test_disabled_client_reports_unavailable() {
        let config = LlmConfig {
            enabled: false,
            ..Default::default()
        };
        let client = LlmClient::new(config);
        assert!(!client.is_available().await);
        assert!(matches!(
            client.complete("test").await,
            Err(LlmError::Disabled)
        ));
    }
}
