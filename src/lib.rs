pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::process::ExitCode;

use clap::Parser;

use crate::commands::{AppState, Cli};
use crate::services::settings_service::SettingsService;
use crate::services::token_service::TokenStore;

pub fn run() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("vans-reporter failed: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = SettingsService::load(cli.config.as_deref())?;
    let log_dir = cli.log_dir.clone().or_else(|| settings.log_dir.clone());
    crate::utils::logger::init_logging(log_dir.as_deref())?;

    let token_store = TokenStore::default_location()?;
    let state = AppState::new(settings, token_store);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(crate::commands::dispatch(state, cli.command))?;

    Ok(())
}
