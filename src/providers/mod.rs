//! Provider module for Frey
//!
//! This module contains the generation-provider abstraction, the Gemini
//! implementation, and the chat-session handle.

pub mod base;
pub mod gemini;
pub mod session;

pub use base::{GenerationOptions, GenerationOutcome, ModelInfo, Provider, Turn};
pub use gemini::GeminiProvider;
pub use session::ChatSession;

use crate::config::ProviderConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a shared provider instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
/// (for example, missing credentials)
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::new(config.gemini.clone())?)),
        other => Err(crate::error::FreyError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}
