//! Model listing command

use crate::config::Config;
use crate::error::Result;
use crate::providers;
use colored::Colorize;

/// List models available from the configured provider
///
/// # Errors
///
/// Returns error if the provider cannot be constructed or listing fails.
pub async fn list_models(config: &Config) -> Result<()> {
    tracing::info!(
        "Listing models from provider: {}",
        config.provider.provider_type
    );

    let provider = providers::create_provider(&config.provider)?;
    let models = provider.list_models().await?;

    if models.is_empty() {
        println!("No models available.");
        return Ok(());
    }

    println!("{}", "Available models".cyan().bold());
    for model in &models {
        println!("  {}  {}", model.name.green(), model.display_name);
    }

    Ok(())
}
