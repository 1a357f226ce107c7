//! Chat session handle
//!
//! A [`ChatSession`] is the one piece of shared mutable state in the system:
//! an ordered, append-only turn history plus the standing options applied to
//! every exchange. It is owned exclusively by one interactive surface at a
//! time; concurrent use of the same session is not supported.

use crate::error::Result;
use crate::providers::{GenerationOptions, GenerationOutcome, Provider, Turn};
use std::sync::Arc;

/// A conversation handle over a [`Provider`]
///
/// The persona instruction is supplied once at session creation (as part of
/// the standing [`GenerationOptions`]) rather than repeated per turn. Each
/// successful [`send`](Self::send) appends exactly one user turn and one
/// model turn; failed or filtered exchanges leave the history untouched so
/// the caller can retry without losing context.
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    options: GenerationOptions,
    history: Vec<Turn>,
}

impl ChatSession {
    /// Create an empty session with standing options
    pub fn new(provider: Arc<dyn Provider>, options: GenerationOptions) -> Self {
        Self {
            provider,
            options,
            history: Vec::new(),
        }
    }

    /// Create a session seeded with prior turns
    ///
    /// Used by the stateless HTTP surface, which receives an optional
    /// prior-turn list with each request.
    pub fn with_history(
        provider: Arc<dyn Provider>,
        options: GenerationOptions,
        history: Vec<Turn>,
    ) -> Self {
        Self {
            provider,
            options,
            history,
        }
    }

    /// The turn history in order
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Discard all turns, keeping the standing options
    pub fn reset(&mut self) {
        tracing::debug!("Resetting chat session ({} turns)", self.history.len());
        self.history.clear();
    }

    /// Send one user message and receive one model turn
    ///
    /// # Errors
    ///
    /// Returns error when the provider call fails; the history is unchanged
    /// in that case.
    pub async fn send(&mut self, message: &str) -> Result<GenerationOutcome> {
        let outcome = self
            .provider
            .chat(&self.history, message, &self.options)
            .await?;

        if let GenerationOutcome::Text(text) = &outcome {
            self.history.push(Turn::user(message));
            self.history.push(Turn::model(text.clone()));
        }

        Ok(outcome)
    }
}
