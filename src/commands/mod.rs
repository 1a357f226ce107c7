//! Command handlers for the CLI
//!
//! This module provides command handlers invoked by the CLI entrypoint.
//!
//! It exposes five top-level command modules:
//!
//! - `chat`     — Interactive chat session
//! - `analyze`  — Summarize tabular data and narrate the findings
//! - `generate` — Tone-conditioned content generation
//! - `models`   — List models from the configured provider
//! - `serve`    — Run the HTTP server
//!
//! These handlers are intentionally small and use the library components:
//! the analyst, the prompt builders, and the gateway.

pub mod analyze;
pub mod chat;
pub mod generate;
pub mod models;
pub mod serve;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::providers;

/// Build the gateway shared by all command handlers
pub(crate) fn build_gateway(config: &Config) -> Result<Gateway> {
    let provider = providers::create_provider(&config.provider)?;
    Ok(Gateway::from_config(provider, config))
}
