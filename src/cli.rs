//! Command-line interface definition for Frey
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chat, data analysis, content generation,
//! model listing, and the HTTP server.

use crate::prompts::Tone;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Frey - LLM orchestration for chat, data summaries, and content
///
/// Compose tabular data summaries and tone-conditioned prose through a
/// hosted generation provider, interactively or over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "frey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Override the configured model (e.g. gemini-2.5-flash)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Frey
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Summarize tabular data and narrate the findings
    Analyze {
        /// Path to a delimited data file (CSV or semicolon-separated)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Inline delimited data (alternative to a file; stdin when neither)
        #[arg(short, long)]
        data: Option<String>,

        /// Print only the computed summary, skipping the model narration
        #[arg(long)]
        summary_only: bool,
    },

    /// Generate prose on a subject in a chosen tone
    Generate {
        /// Subject to write about
        #[arg(short, long)]
        subject: String,

        /// Tone of the generated text
        #[arg(short, long, value_enum, default_value_t = Tone::Professional)]
        tone: Tone,
    },

    /// List models available from the configured provider
    Models,

    /// Run the HTTP server
    Serve {
        /// Override the configured listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
