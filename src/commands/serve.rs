//! HTTP server command
//!
//! Builds the gateway once at startup. When credentials are missing the
//! server still starts, but every capability endpoint answers 503; this
//! mirrors the credential check being a startup concern, not a per-request
//! one.

use crate::config::Config;
use crate::error::Result;
use crate::server::{self, AppState};
use std::sync::Arc;

/// Run the HTTP server
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `host` - Optional override for the configured listen host
/// * `port` - Optional override for the configured listen port
///
/// # Errors
///
/// Returns error if the listen address cannot be bound.
pub async fn run_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let gateway = if config.has_credentials() {
        Some(Arc::new(super::build_gateway(&config)?))
    } else {
        tracing::warn!("No generation credentials configured; API calls will answer 503");
        None
    };

    let state = AppState::new(gateway);
    server::serve(state, &config).await
}
