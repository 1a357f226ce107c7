//! Configuration management for Frey
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{FreyError, Result};
use crate::prompts;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Frey
///
/// This structure holds all configuration needed by the assistant,
/// including provider settings, generation temperatures, the persona
/// instruction, and HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (Gemini, etc.)
    pub provider: ProviderConfig,

    /// Generation temperature policy per use case
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Persona/style instruction applied to every call path
    #[serde(default)]
    pub persona: PersonaConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Provider configuration
///
/// Specifies which generation provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; usually supplied via the GEMINI_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for generation
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Optional API base URL (useful for tests and local mocks)
    ///
    /// When set, this base is used to build Gemini endpoints (e.g.
    /// `/v1beta/models/{model}:generateContent`), which allows tests to
    /// point the provider at a mock server.
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            api_base: None,
        }
    }
}

/// Generation temperature policy
///
/// Analysis narration favors fidelity to the computed statistics, so it runs
/// at a low temperature. Content generation favors stylistic variety.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Temperature for analysis narration
    #[serde(default = "default_analysis_temperature")]
    pub analysis_temperature: f32,

    /// Temperature for content generation
    #[serde(default = "default_content_temperature")]
    pub content_temperature: f32,

    /// Temperature for chat turns
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
}

fn default_analysis_temperature() -> f32 {
    0.3
}

fn default_content_temperature() -> f32 {
    0.7
}

fn default_chat_temperature() -> f32 {
    0.7
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            analysis_temperature: default_analysis_temperature(),
            content_temperature: default_content_temperature(),
            chat_temperature: default_chat_temperature(),
        }
    }
}

/// Persona configuration
///
/// The persona text is threaded explicitly into every call path as a standing
/// system instruction; it is never inlined into user payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// System instruction describing the assistant's persona and style
    #[serde(default = "default_persona")]
    pub system_prompt: String,
}

fn default_persona() -> String {
    prompts::DEFAULT_PERSONA.to_string()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_persona(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Allowed CORS origins; when empty, any origin is allowed
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            generation: GenerationConfig::default(),
            persona: PersonaConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FreyError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FreyError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("FREY_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        // GEMINI_API_KEY matches the upstream service convention;
        // FREY_GEMINI_API_KEY takes precedence when both are set.
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.is_empty() {
                self.provider.gemini.api_key = Some(api_key);
            }
        }
        if let Ok(api_key) = std::env::var("FREY_GEMINI_API_KEY") {
            if !api_key.is_empty() {
                self.provider.gemini.api_key = Some(api_key);
            }
        }

        if let Ok(model) = std::env::var("FREY_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("FREY_GEMINI_API_BASE") {
            self.provider.gemini.api_base = Some(api_base);
        }

        if let Ok(persona) = std::env::var("FREY_PERSONA") {
            self.persona.system_prompt = persona;
        }

        if let Ok(host) = std::env::var("FREY_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("FREY_SERVER_PORT") {
            if let Ok(value) = port.parse() {
                self.server.port = value;
            } else {
                tracing::warn!("Invalid FREY_SERVER_PORT: {}", port);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            self.provider.gemini.model = model.clone();
        }
    }

    /// Validate the configuration
    ///
    /// Credentials are checked once here at startup; a failure short-circuits
    /// every downstream provider call.
    ///
    /// # Errors
    ///
    /// Returns [`FreyError::MissingCredentials`] if no API key is configured,
    /// or [`FreyError::Config`] for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !self.has_credentials() {
            return Err(FreyError::MissingCredentials(
                "GEMINI_API_KEY is not set; export it or add provider.gemini.api_key to the config"
                    .to_string(),
            )
            .into());
        }

        self.validate_settings()
    }

    /// Validate everything except credentials
    ///
    /// The server defers the credential check to its 503 path, but still
    /// refuses to start with out-of-range temperatures or an empty persona.
    ///
    /// # Errors
    ///
    /// Returns [`FreyError::Config`] for out-of-range values.
    pub fn validate_settings(&self) -> Result<()> {
        for (name, value) in [
            ("analysis_temperature", self.generation.analysis_temperature),
            ("content_temperature", self.generation.content_temperature),
            ("chat_temperature", self.generation.chat_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(FreyError::Config(format!(
                    "generation.{} must be between 0.0 and 2.0, got {}",
                    name, value
                ))
                .into());
            }
        }

        if self.persona.system_prompt.trim().is_empty() {
            return Err(
                FreyError::Config("persona.system_prompt must not be empty".to_string()).into(),
            );
        }

        Ok(())
    }

    /// Whether an API key is configured for the active provider
    pub fn has_credentials(&self) -> bool {
        self.provider
            .gemini
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
