//! Frey - LLM orchestration CLI
//!
//! Main entry point for the Frey application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use frey::cli::{Cli, Commands};
use frey::commands;
use frey::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(&cli.config, &cli)?;

    // Validate configuration; the server handles missing credentials itself
    // by answering 503, so it only defers the credential check.
    if matches!(cli.command, Commands::Serve { .. }) {
        config.validate_settings()?;
    } else {
        config.validate()?;
    }

    // Execute command
    match cli.command {
        Commands::Chat => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Analyze {
            file,
            data,
            summary_only,
        } => {
            commands::analyze::run_analyze(config, file, data, summary_only).await?;
            Ok(())
        }
        Commands::Generate { subject, tone } => {
            commands::generate::run_generate(config, subject, tone).await?;
            Ok(())
        }
        Commands::Models => {
            commands::models::list_models(&config).await?;
            Ok(())
        }
        Commands::Serve { host, port } => {
            tracing::info!("Starting HTTP server");
            commands::serve::run_serve(config, host, port).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "frey=debug" } else { "frey=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
