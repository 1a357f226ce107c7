//! Interactive chat session
//!
//! A readline-based loop that owns a single [`ChatSession`] and submits each
//! line as one user turn. The session is the only piece of mutable state and
//! is exclusive to the loop. Provider failures are rendered in-band with the
//! error marker; the conversation memory is preserved so the user can retry.

use crate::config::Config;
use crate::error::Result;
use crate::gateway;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Start an interactive chat session
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
///
/// # Errors
///
/// Returns error if the provider cannot be constructed or the terminal
/// cannot be read. Per-message provider failures do not end the loop.
pub async fn run_chat(config: Config) -> Result<()> {
    tracing::info!("Starting interactive chat session");

    let gateway = super::build_gateway(&config)?;
    let mut session = gateway.start_chat();

    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&config.provider.gemini.model);

    loop {
        match rl.readline(&"You> ".cyan().to_string()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/new" => {
                        session.reset();
                        println!("{}", "Started a new conversation.".green());
                        continue;
                    }
                    "/history" => {
                        print_history(&session);
                        continue;
                    }
                    "/help" => {
                        print_help();
                        continue;
                    }
                    _ => {}
                }

                match session.send(trimmed).await {
                    Ok(outcome) => {
                        println!("{} {}\n", "Frey>".magenta().bold(), outcome.into_text());
                    }
                    Err(e) => {
                        // In-band diagnostic; the session history is untouched
                        println!("{}\n", gateway::diagnostic(&e).red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", "Goodbye!".green());
    Ok(())
}

fn print_welcome_banner(model: &str) {
    println!("{}", "Frey interactive chat".magenta().bold());
    println!("Model: {}", model.cyan());
    println!(
        "Type {} for commands, {} to leave.\n",
        "/help".yellow(),
        "/quit".yellow()
    );
}

fn print_help() {
    println!("Available commands:");
    println!("  {}      Start a new conversation", "/new".yellow());
    println!("  {}  Show the conversation so far", "/history".yellow());
    println!("  {}     Exit the chat", "/quit".yellow());
    println!();
}

fn print_history(session: &crate::providers::ChatSession) {
    if session.history().is_empty() {
        println!("{}\n", "No turns yet.".yellow());
        return;
    }
    for turn in session.history() {
        let label = if turn.role == "user" {
            "You".cyan()
        } else {
            "Frey".magenta()
        };
        println!("{}: {}", label, turn.text);
    }
    println!();
}
