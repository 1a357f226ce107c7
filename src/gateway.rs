//! Thin call sites over the generation provider
//!
//! The [`Gateway`] composes the persona, the prompt builders, and the
//! temperature policy into the three capabilities: chat sessions, analysis
//! narration, and content generation. Each call is a single pass: it
//! completes, fails, or comes back empty; there are no retries and no
//! backoff.
//!
//! Empty/filtered responses are normalized into soft diagnostic text so
//! callers can still render something actionable. Provider failures are
//! returned as errors; interactive surfaces convert them to in-band marker
//! text via [`diagnostic`], while the HTTP surface maps them to 500.

use crate::config::{Config, GenerationConfig};
use crate::error::Result;
use crate::prompts::{self, Tone};
use crate::providers::{ChatSession, GenerationOptions, Provider};
use std::sync::Arc;

/// Fixed marker at the start of every in-band provider diagnostic
pub const PROVIDER_ERROR_PREFIX: &str = "GENERATION ERROR";

/// Composition of a provider with the persona and temperature policy
///
/// The persona string is threaded in explicitly at construction; the
/// gateway never reaches for global state.
pub struct Gateway {
    provider: Arc<dyn Provider>,
    persona: String,
    generation: GenerationConfig,
}

impl Gateway {
    /// Create a gateway from its parts
    pub fn new(provider: Arc<dyn Provider>, persona: String, generation: GenerationConfig) -> Self {
        Self {
            provider,
            persona,
            generation,
        }
    }

    /// Create a gateway from a validated configuration
    pub fn from_config(provider: Arc<dyn Provider>, config: &Config) -> Self {
        Self::new(
            provider,
            config.persona.system_prompt.clone(),
            config.generation.clone(),
        )
    }

    /// The shared provider handle
    pub fn provider(&self) -> Arc<dyn Provider> {
        Arc::clone(&self.provider)
    }

    /// Start a chat session with the persona as the standing instruction
    ///
    /// The persona is supplied once here; it is not repeated per turn.
    pub fn start_chat(&self) -> ChatSession {
        ChatSession::new(
            Arc::clone(&self.provider),
            GenerationOptions::new(self.generation.chat_temperature, self.persona.clone()),
        )
    }

    /// Rebuild a chat session from a prior-turn list
    ///
    /// The HTTP surface is stateless and receives the history with each
    /// request; this seeds a session so one exchange can run over it.
    pub fn resume_chat(&self, history: Vec<crate::providers::Turn>) -> ChatSession {
        ChatSession::with_history(
            Arc::clone(&self.provider),
            GenerationOptions::new(self.generation.chat_temperature, self.persona.clone()),
            history,
        )
    }

    /// Narrate a raw summary report in the persona's voice
    ///
    /// Runs at the analysis temperature: fidelity to the computed statistics
    /// matters more than creativity here.
    ///
    /// # Errors
    ///
    /// Returns error when the provider call fails; an empty/filtered
    /// response is not an error and resolves to a diagnostic notice.
    pub async fn narrate_analysis(&self, raw_report: &str) -> Result<String> {
        let prompt = prompts::build_analysis_prompt(raw_report);
        let options =
            GenerationOptions::new(self.generation.analysis_temperature, self.persona.clone());
        let outcome = self.provider.generate(&prompt, &options).await?;
        Ok(outcome.into_text())
    }

    /// Generate prose on a subject in the given tone
    ///
    /// Runs at the content temperature to favor stylistic variety.
    ///
    /// # Errors
    ///
    /// Returns error when the provider call fails; an empty/filtered
    /// response is not an error and resolves to a diagnostic notice.
    pub async fn generate_content(&self, subject: &str, tone: Tone) -> Result<String> {
        let prompt = prompts::build_content_prompt(subject, tone);
        let options =
            GenerationOptions::new(self.generation.content_temperature, self.persona.clone());
        let outcome = self.provider.generate(&prompt, &options).await?;
        Ok(outcome.into_text())
    }
}

/// Convert a provider failure into in-band diagnostic text
///
/// Interactive surfaces render this instead of raising; the error marker is
/// fixed so users (and tests) can recognize the class at a glance.
pub fn diagnostic(err: &anyhow::Error) -> String {
    format!(
        "{}: the request could not be processed. Details: {}. (Your conversation is preserved; please try again.)",
        PROVIDER_ERROR_PREFIX, err
    )
}
