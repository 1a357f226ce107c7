//! Content generation command

use crate::config::Config;
use crate::error::Result;
use crate::prompts::Tone;

/// Generate prose on a subject in the chosen tone
///
/// # Errors
///
/// Returns error if the provider cannot be constructed or the call fails.
pub async fn run_generate(config: Config, subject: String, tone: Tone) -> Result<()> {
    tracing::info!("Generating {} content about: {}", tone, subject);

    let gateway = super::build_gateway(&config)?;
    let content = gateway.generate_content(&subject, tone).await?;
    println!("{}", content);

    Ok(())
}
