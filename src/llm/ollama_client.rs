//! Ollama Client - Integration with Ollama LLM server

use crate::config::LlmConfig;
use crate::error::{AgentError, AgentResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Marker prefixed to inline error strings substituted for model output.
/// Strategies embed these in the report instead of failing the request.
pub const LLM_ERROR_MARKER: &str = "[llm error]";

/// Ollama API client
pub struct OllamaClient {
    base_url: String,
    model: String,
    num_predict: u32,
    temperature: f32,
    client: Client,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: Option<String>, // "json" for structured output
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new Ollama client from configuration
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            num_predict: config.num_predict,
            temperature: config.temperature,
            client: Client::new(),
        }
    }

    /// Generate a completion. `model` overrides the configured default for
    /// this call; the caller's choice is never second-guessed.
    pub async fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
        json_format: bool,
    ) -> AgentResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let model = model.unwrap_or(&self.model).to_string();

        debug!(model = %model, prompt_len = prompt.len(), "sending prompt to ollama");

        let request = OllamaRequest {
            model,
            prompt: prompt.to_string(),
            stream: false,
            format: json_format.then(|| "json".to_string()),
            options: OllamaOptions {
                num_predict: self.num_predict,
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::backend(format!("failed to reach ollama: {}", e)))?;

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AgentError::backend(format!("failed to parse ollama response: {}", e)))?;

        debug!(response_len = ollama_response.response.len(), "ollama reply received");
        Ok(ollama_response.response)
    }

    /// Generate structured JSON output
    pub async fn generate_json<T>(&self, prompt: &str, model: Option<&str>) -> AgentResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.generate(prompt, model, true).await?;

        // The reply may be wrapped in markdown code fences
        let json_str = Self::extract_json_from_response(&response);

        serde_json::from_str(&json_str).map_err(|e| {
            AgentError::classification(format!(
                "failed to parse JSON reply: {} (reply was: {})",
                e,
                json_str.chars().take(200).collect::<String>()
            ))
        })
    }

    /// Strategy-facing completion: wraps the prompt with a serialized data
    /// context and degrades any failure to an inline error string. One
    /// failed call yields one degraded report section; no retry.
    pub async fn complete(
        &self,
        prompt: &str,
        context: Option<&serde_json::Value>,
        model: Option<&str>,
    ) -> String {
        let full_prompt = match context {
            Some(ctx) => format!(
                "DATA CONTEXT:\n{}\n\nTASK:\n{}\n\nANSWER: be concise and to the point.",
                serde_json::to_string_pretty(ctx).unwrap_or_else(|_| ctx.to_string()),
                prompt
            ),
            None => prompt.to_string(),
        };

        match self.generate(&full_prompt, model, false).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "model call failed, substituting error marker");
                format!("{} {}", LLM_ERROR_MARKER, e)
            }
        }
    }

    /// Extract JSON from a reply (handles markdown code blocks)
    fn extract_json_from_response(response: &str) -> String {
        let trimmed = response.trim();

        if let Some(rest) = trimmed.strip_prefix("```json") {
            if let Some(end) = rest.find("```") {
                return rest[..end].trim().to_string();
            }
        } else if trimmed.starts_with("```") {
            if let Some(start) = trimmed.find('\n') {
                if let Some(end) = trimmed[start + 1..].find("```") {
                    return trimmed[start + 1..start + 1 + end].trim().to_string();
                }
            }
        }

        // Fall back to the outermost object boundaries
        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }

        trimmed.to_string()
    }

    /// Check if the Ollama server is reachable
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                info!(ok, "ollama health check");
                ok
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_plain() {
        let reply = r#"{"category": "querying", "confidence": 0.9, "rationale": "x"}"#;
        assert_eq!(OllamaClient::extract_json_from_response(reply), reply);
    }

    #[test]
    fn test_extract_json_fenced() {
        let reply = "```json\n{\"a\": 1}\n```";
        assert_eq!(OllamaClient::extract_json_from_response(reply), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_embedded_in_prose() {
        let reply = "Sure, here you go: {\"a\": 1} hope that helps";
        assert_eq!(OllamaClient::extract_json_from_response(reply), "{\"a\": 1}");
    }
}
