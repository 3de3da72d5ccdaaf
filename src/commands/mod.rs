pub mod report;
pub mod token;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::error::AppResult;
use crate::models::settings::AppSettings;
use crate::services::forecast_service::ForecastService;
use crate::services::hours_calculator::HoursCalculator;
use crate::services::token_service::TokenStore;

use self::report::ReportArgs;
use self::token::TokenCommand;

#[derive(Debug, Parser)]
#[command(name = "vans-reporter")]
#[command(about = "Monthly hours report for the Vans department")]
pub struct Cli {
    /// YAML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory for rolling log files.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Calculate hours and write the report.
    Report(ReportArgs),
    /// Manage the stored Monday.com API token.
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },
}

#[derive(Clone)]
pub struct AppState {
    settings: Arc<AppSettings>,
    calculator: HoursCalculator,
    forecast_service: ForecastService,
    token_store: TokenStore,
}

impl AppState {
    pub fn new(settings: AppSettings, token_store: TokenStore) -> Self {
        let calculator = HoursCalculator::new(settings.policy);
        let forecast_service = ForecastService::new(calculator.clone());
        Self {
            settings: Arc::new(settings),
            calculator,
            forecast_service,
            token_store,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn calculator(&self) -> &HoursCalculator {
        &self.calculator
    }

    pub fn forecast_service(&self) -> &ForecastService {
        &self.forecast_service
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.token_store
    }
}

pub async fn dispatch(state: AppState, command: Commands) -> AppResult<()> {
    match command {
        Commands::Report(args) => {
            let outcome = report::run_report(&state, args, token::prompt_for_token).await?;
            report::print_outcome(&outcome);
            Ok(())
        }
        Commands::Token { command } => token::run_token_command(&state, command),
    }
}
