//! Frey - LLM orchestration library
//!
//! This library provides a thin orchestration layer over a hosted generation
//! provider, composing three capabilities: conversational chat, tabular data
//! summarization, and tone-conditioned content generation.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `analyst`: Tabular data parsing and descriptive summarization
//! - `prompts`: Persona and prompt composition, tone vocabulary
//! - `providers`: Generation provider abstraction and the Gemini implementation
//! - `gateway`: Persona + temperature composition over a provider
//! - `server`: HTTP surface (axum router)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use frey::analyst;
//!
//! fn main() -> anyhow::Result<()> {
//!     let report = analyst::summarize_str("name,age\nAlice,30\nBob,25\n")?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

pub mod analyst;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prompts;
pub mod providers;
pub mod server;

// Re-export commonly used types
pub use analyst::SummaryReport;
pub use config::Config;
pub use error::{FreyError, Result};
pub use gateway::Gateway;
pub use prompts::Tone;
pub use providers::{ChatSession, GenerationOutcome, Provider, Turn};
