//! Gemini provider implementation
//!
//! This module implements the [`Provider`] trait for the hosted Gemini
//! generation API (`generateContent` REST endpoint), including model listing
//! and block-reason extraction for safety-filtered responses.

use crate::config::GeminiConfig;
use crate::error::{FreyError, Result};
use crate::providers::{GenerationOptions, GenerationOutcome, ModelInfo, Provider, Turn};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base for the hosted Gemini service
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Request timeout; no other timeout is enforced by this crate
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini API provider
///
/// Connects to the hosted Gemini REST API for one-shot and chat generation.
/// Each call is a single request with no retries; failures surface as
/// [`FreyError::Provider`].
///
/// # Examples
///
/// ```no_run
/// use frey::config::GeminiConfig;
/// use frey::providers::{GeminiProvider, GenerationOptions, Provider};
///
/// # async fn example() -> frey::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("key".to_string()),
///     model: "gemini-2.5-flash".to_string(),
///     api_base: None,
/// };
/// let provider = GeminiProvider::new(config)?;
/// let options = GenerationOptions::new(0.7, "You are a helpful assistant.");
/// let outcome = provider.generate("Say hello", &options).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfigBody,
}

/// One content entry (a turn) on the wire
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// One text part of a content entry
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Generation configuration on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody {
    temperature: f32,
}

/// Response body for `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// Feedback metadata carrying the block reason when text is absent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Response body for the model-listing endpoint
#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns [`FreyError::MissingCredentials`] when no API key is
    /// configured, or [`FreyError::Provider`] if HTTP client initialization
    /// fails.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FreyError::MissingCredentials("gemini".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("frey/0.1.0")
            .build()
            .map_err(|e| FreyError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        tracing::info!(
            "Initialized Gemini provider: model={}, api_base={}",
            config.model,
            api_base
        );

        Ok(Self {
            client,
            api_key,
            model: config.model,
            api_base,
        })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a `generateContent` request and normalize the response
    async fn generate_content(
        &self,
        contents: Vec<Content>,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );

        let request = GenerateContentRequest {
            contents,
            system_instruction: options.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part { text: text.clone() }],
            }),
            generation_config: GenerationConfigBody {
                temperature: options.temperature,
            },
        };

        tracing::debug!(
            "Sending Gemini request: {} contents, temperature={}",
            request.contents.len(),
            options.temperature
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                FreyError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(FreyError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            FreyError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        Ok(normalize_response(body))
    }
}

/// Extract produced text or a block reason from a response body
fn normalize_response(body: GenerateContentResponse) -> GenerationOutcome {
    let text = body
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        let block_reason = body.prompt_feedback.and_then(|f| f.block_reason);
        tracing::warn!(?block_reason, "Gemini returned an empty response");
        GenerationOutcome::Empty { block_reason }
    } else {
        GenerationOutcome::Text(trimmed.to_string())
    }
}

/// Convert turns plus a new user message into wire contents
fn build_contents(history: &[Turn], message: &str) -> Vec<Content> {
    history
        .iter()
        .map(|turn| Content {
            role: Some(turn.role.clone()),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        })
        .chain(std::iter::once(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: message.to_string(),
            }],
        }))
        .collect()
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome> {
        let contents = vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }];
        self.generate_content(contents, options).await
    }

    async fn chat(
        &self,
        history: &[Turn],
        message: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome> {
        self.generate_content(build_contents(history, message), options)
            .await
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", self.api_base);
        tracing::debug!("Listing Gemini models from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FreyError::Provider(format!("Failed to list models: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FreyError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: ListModelsResponse = response.json().await.map_err(|e| {
            FreyError::Provider(format!("Failed to parse model list: {}", e))
        })?;

        // Only models that can serve generateContent are useful to callers
        let models = body
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| {
                let display = if m.display_name.is_empty() {
                    m.name.clone()
                } else {
                    m.display_name
                };
                // API names come prefixed with "models/"
                let name = m.name.trim_start_matches("models/").to_string();
                ModelInfo::new(name, display)
            })
            .collect();

        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-2.5-flash".to_string(),
            api_base: None,
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = GeminiConfig {
            api_key: None,
            ..config_with_key()
        };
        let err = GeminiProvider::new(config).err().unwrap();
        let frey = err.downcast_ref::<FreyError>().unwrap();
        assert!(matches!(frey, FreyError::MissingCredentials(_)));
    }

    #[test]
    fn test_new_rejects_blank_api_key() {
        let config = GeminiConfig {
            api_key: Some("   ".to_string()),
            ..config_with_key()
        };
        assert!(GeminiProvider::new(config).is_err());
    }

    #[test]
    fn test_new_with_key_succeeds() {
        let provider = GeminiProvider::new(config_with_key()).unwrap();
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_build_contents_appends_single_user_turn() {
        let history = vec![Turn::user("hi"), Turn::model("hello")];
        let contents = build_contents(&history, "how are you?");
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role.as_deref(), Some("user"));
        assert_eq!(contents[1].role.as_deref(), Some("model"));
        assert_eq!(contents[2].role.as_deref(), Some("user"));
        assert_eq!(contents[2].parts[0].text, "how are you?");
    }

    #[test]
    fn test_normalize_response_with_text() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "  Hello!  "}]}}
            ]
        }))
        .unwrap();
        let outcome = normalize_response(body);
        assert_eq!(outcome, GenerationOutcome::Text("Hello!".to_string()));
    }

    #[test]
    fn test_normalize_response_blocked() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        let outcome = normalize_response(body);
        assert_eq!(
            outcome,
            GenerationOutcome::Empty {
                block_reason: Some("SAFETY".to_string())
            }
        );
    }

    #[test]
    fn test_normalize_response_empty_without_feedback() {
        let body: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        let outcome = normalize_response(body);
        assert_eq!(outcome, GenerationOutcome::Empty { block_reason: None });
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: "persona".to_string(),
                }],
            }),
            generation_config: GenerationConfigBody { temperature: 0.3 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "persona");
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
    }
}
