use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::commands::AppState;
use crate::error::AppResult;
use crate::utils::redact::mask_secret;

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum TokenCommand {
    /// Show whether a token is stored.
    Status,
    /// Delete the stored token.
    Reset,
}

pub fn run_token_command(state: &AppState, command: TokenCommand) -> AppResult<()> {
    let store = state.token_store();
    match command {
        TokenCommand::Status => match store.load() {
            Some(token) => println!(
                "Token stored in {}: {}",
                store.path().display(),
                mask_secret(&token)
            ),
            None => println!("No token stored in {}", store.path().display()),
        },
        TokenCommand::Reset => {
            if store.reset()? {
                println!("Token removed from {}", store.path().display());
            } else {
                println!("No token stored in {}", store.path().display());
            }
        }
    }
    Ok(())
}

/// Asks for the API token on stdin. An empty line means the user declined.
pub fn prompt_for_token() -> AppResult<Option<String>> {
    let mut stderr = io::stderr();
    writeln!(stderr, "A Monday.com API token is required.")?;
    writeln!(
        stderr,
        "Find it under your profile picture > Developers > My Access Tokens."
    )?;
    write!(stderr, "Paste your token: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let token = line.trim();
    Ok((!token.is_empty()).then(|| token.to_string()))
}
