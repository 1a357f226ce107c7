//! Data analysis command
//!
//! Reads delimited data from a file, an inline argument, or stdin, computes
//! the summary report locally, and (unless `--summary-only`) narrates the
//! findings through the provider.

use crate::analyst;
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

/// Summarize tabular data and narrate the findings
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `file` - Path to a delimited data file
/// * `data` - Inline delimited data; stdin is read when both are absent
/// * `summary_only` - Print only the computed summary, skipping the model
///
/// # Errors
///
/// Returns error if the input cannot be parsed into a non-empty table or
/// the provider call fails.
pub async fn run_analyze(
    config: Config,
    file: Option<PathBuf>,
    data: Option<String>,
    summary_only: bool,
) -> Result<()> {
    let report = match (file, data) {
        (Some(path), _) => {
            tracing::info!("Analyzing data from {}", path.display());
            analyst::summarize_file(&path)?
        }
        (None, Some(text)) => analyst::summarize_str(&text)?,
        (None, None) => {
            tracing::debug!("Reading data from stdin");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            analyst::summarize_str(&buffer)?
        }
    };

    let summary = report.to_string();
    println!("{}", "Summary".cyan().bold());
    println!("{}\n", summary);

    if summary_only {
        return Ok(());
    }

    let gateway = super::build_gateway(&config)?;
    let analysis = gateway.narrate_analysis(&summary).await?;
    println!("{}", "Analysis".magenta().bold());
    println!("{}", analysis);

    Ok(())
}
