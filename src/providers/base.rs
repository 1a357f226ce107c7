//! Base provider trait and common types
//!
//! This module defines the [`Provider`] trait that generation providers
//! implement, along with conversation turns, per-call options, and the
//! normalized generation outcome.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One turn of a chat conversation
///
/// Turns are append-only: a session grows by exactly one user turn and one
/// model turn per successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the turn author ("user" or "model")
    pub role: String,
    /// Text of the turn
    pub text: String,
}

impl Turn {
    /// Creates a new user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use frey::providers::Turn;
    ///
    /// let turn = Turn::user("Hello!");
    /// assert_eq!(turn.role, "user");
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    /// Creates a new model turn
    ///
    /// # Examples
    ///
    /// ```
    /// use frey::providers::Turn;
    ///
    /// let turn = Turn::model("Hi there!");
    /// assert_eq!(turn.role, "model");
    /// ```
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            text: text.into(),
        }
    }
}

/// Per-call generation options
///
/// Carries the sampling temperature and the standing persona instruction.
/// The persona is threaded through here on every call path; it is never
/// inlined into prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Standing system instruction (persona/style block)
    pub system_instruction: Option<String>,
}

impl GenerationOptions {
    /// Creates options with a temperature and a standing instruction
    pub fn new(temperature: f32, system_instruction: impl Into<String>) -> Self {
        Self {
            temperature,
            system_instruction: Some(system_instruction.into()),
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            system_instruction: None,
        }
    }
}

/// Normalized result of one generation call
///
/// A call either produced text or came back empty (typically a safety
/// filter). Transport and API failures are errors, not outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The provider produced text
    Text(String),
    /// The provider returned no text; the block reason is carried when the
    /// response metadata exposed one
    Empty { block_reason: Option<String> },
}

impl GenerationOutcome {
    /// Resolve the outcome into displayable text
    ///
    /// Empty outcomes become a soft diagnostic notice rather than an error,
    /// so callers can still render something actionable. This is a terminal
    /// condition for the call; it is never retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use frey::providers::GenerationOutcome;
    ///
    /// let text = GenerationOutcome::Text("Hello".to_string()).into_text();
    /// assert_eq!(text, "Hello");
    ///
    /// let notice = GenerationOutcome::Empty { block_reason: None }.into_text();
    /// assert!(notice.contains("empty"));
    /// ```
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Empty {
                block_reason: Some(reason),
            } => format!(
                "Generation returned an empty response (safety filter? reason: {})",
                reason
            ),
            Self::Empty { block_reason: None } => {
                "Generation returned an empty response.".to_string()
            }
        }
    }

    /// Whether this outcome carries produced text
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// Model information reported by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Unique identifier (e.g. "gemini-2.5-flash")
    pub name: String,
    /// Display name for user-friendly presentation
    pub display_name: String,
}

impl ModelInfo {
    /// Create a new ModelInfo instance
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// Provider trait for hosted generation services
///
/// Gives the rest of the crate a uniform interface for one-shot generation,
/// chat turns over an explicit history, and model discovery.
///
/// # Examples
///
/// ```no_run
/// use frey::providers::{GenerationOptions, GenerationOutcome, Provider, Turn};
/// use frey::error::Result;
/// use async_trait::async_trait;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl Provider for MyProvider {
///     async fn generate(
///         &self,
///         _prompt: &str,
///         _options: &GenerationOptions,
///     ) -> Result<GenerationOutcome> {
///         Ok(GenerationOutcome::Text("Response".to_string()))
///     }
///
///     async fn chat(
///         &self,
///         _history: &[Turn],
///         message: &str,
///         _options: &GenerationOptions,
///     ) -> Result<GenerationOutcome> {
///         Ok(GenerationOutcome::Text(format!("Echo: {}", message)))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// One-shot generation from a composed prompt
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is malformed
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<GenerationOutcome>;

    /// Generate the next model turn for a conversation
    ///
    /// `history` holds the prior turns in order; `message` is the new user
    /// turn. The provider does not mutate the history; session bookkeeping
    /// belongs to [`crate::providers::ChatSession`].
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is malformed
    async fn chat(
        &self,
        history: &[Turn],
        message: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome>;

    /// List the models available from this provider
    ///
    /// # Default Implementation
    ///
    /// Returns an error indicating that model listing is not supported.
    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Err(crate::error::FreyError::Provider(
            "Model listing is not supported by this provider".to_string(),
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_user() {
        let turn = Turn::user("Hello");
        assert_eq!(turn.role, "user");
        assert_eq!(turn.text, "Hello");
    }

    #[test]
    fn test_turn_model() {
        let turn = Turn::model("Hi");
        assert_eq!(turn.role, "model");
        assert_eq!(turn.text, "Hi");
    }

    #[test]
    fn test_turn_serialization() {
        let turn = Turn::user("Test");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"text\":\"Test\""));
    }

    #[test]
    fn test_generation_options_new() {
        let options = GenerationOptions::new(0.3, "persona");
        assert!((options.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(options.system_instruction, Some("persona".to_string()));
    }

    #[test]
    fn test_generation_options_default() {
        let options = GenerationOptions::default();
        assert!(options.system_instruction.is_none());
    }

    #[test]
    fn test_outcome_text_into_text() {
        let outcome = GenerationOutcome::Text("produced".to_string());
        assert!(outcome.is_text());
        assert_eq!(outcome.into_text(), "produced");
    }

    #[test]
    fn test_outcome_empty_with_reason_into_text() {
        let outcome = GenerationOutcome::Empty {
            block_reason: Some("SAFETY".to_string()),
        };
        assert!(!outcome.is_text());
        let text = outcome.into_text();
        assert!(text.contains("empty"));
        assert!(text.contains("SAFETY"));
    }

    #[test]
    fn test_outcome_empty_without_reason_into_text() {
        let outcome = GenerationOutcome::Empty { block_reason: None };
        let text = outcome.into_text();
        assert!(text.contains("empty response"));
    }

    #[test]
    fn test_default_list_models_error() {
        use async_trait::async_trait;

        struct MockProvider;

        #[async_trait]
        impl Provider for MockProvider {
            async fn generate(
                &self,
                _prompt: &str,
                _options: &GenerationOptions,
            ) -> Result<GenerationOutcome> {
                Ok(GenerationOutcome::Text("test".to_string()))
            }

            async fn chat(
                &self,
                _history: &[Turn],
                _message: &str,
                _options: &GenerationOptions,
            ) -> Result<GenerationOutcome> {
                Ok(GenerationOutcome::Text("test".to_string()))
            }
        }

        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let provider = MockProvider;
            let result = provider.list_models().await;
            assert!(result.is_err());
        });
    }
}
