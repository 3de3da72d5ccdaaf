use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;
use tracing::{info, warn};

use crate::commands::AppState;
use crate::error::AppResult;
use crate::models::overrides::HoursOverride;
use crate::models::settings::MAX_FORECAST_MONTHS;
use crate::models::summary::{ForecastSummary, ProjectSummary};
use crate::services::calendar_utils::{month_label, parse_iso_date};
use crate::services::monday_client::{MondayClient, ProjectSource, StaticProjectSource};
use crate::services::report_service::ReportService;
use crate::services::settings_service::ensure_forecast_months;
use crate::services::summary_editor::SummaryEditor;

pub const DEFAULT_REPORT_FILE: &str = "Vans_Report.json";

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Cutoff between completed and remaining hours (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date_arg)]
    pub as_of: Option<NaiveDate>,
    /// Report file; `.md` renders Markdown, anything else JSON.
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,
    /// Months to forecast after the report month. Defaults to the settings value.
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=MAX_FORECAST_MONTHS as i64))]
    pub forecast_months: Option<u32>,
    /// Read projects from a JSON file instead of Monday.com.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Override a project total, e.g. `Vito Sport X=96`.
    #[arg(long = "set-project")]
    pub set_project: Vec<String>,
    /// Override one person's project hours, e.g. `Rolf Wiberg/Vito Sport X=40`.
    #[arg(long = "set-person")]
    pub set_person: Vec<String>,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).map_err(|err| err.to_string())
}

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub path: PathBuf,
    pub calculated: Arc<ProjectSummary>,
    pub summary: ProjectSummary,
    pub forecast: Option<ForecastSummary>,
}

/// Picks the project source, then builds and writes the report.
pub async fn run_report<F>(state: &AppState, args: ReportArgs, prompt: F) -> AppResult<ReportOutcome>
where
    F: FnOnce() -> AppResult<Option<String>>,
{
    let source: Box<dyn ProjectSource> = match &args.input {
        Some(path) => Box::new(StaticProjectSource::new(path.clone())),
        None => {
            let token = state.token_store().resolve(prompt)?;
            Box::new(MondayClient::try_new(state.settings().board.clone(), token)?)
        }
    };

    build_report(state, args, source.as_ref()).await
}

pub async fn build_report(
    state: &AppState,
    args: ReportArgs,
    source: &dyn ProjectSource,
) -> AppResult<ReportOutcome> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let months = args
        .forecast_months
        .unwrap_or(state.settings().forecast_months);
    ensure_forecast_months(months)?;

    let projects = source.fetch_projects().await?;
    if projects.is_empty() {
        warn!(target: "app::report", "no department projects found");
    }

    let calculated = Arc::new(state.calculator().calculate_project_hours(&projects, as_of));

    let mut editor = SummaryEditor::new(Arc::clone(&calculated));
    for raw in &args.set_project {
        editor.apply(HoursOverride::parse_project(raw)?)?;
    }
    for raw in &args.set_person {
        editor.apply(HoursOverride::parse_person(raw)?)?;
    }

    let forecast = (months > 0).then(|| {
        state
            .forecast_service()
            .generate_forecast(&projects, as_of, months)
    });

    let summary = editor.into_summary();
    let path = ReportService::write_report(&args.output, &summary, forecast.as_ref())?;

    info!(
        target: "app::report",
        month = %month_label(summary.month_start),
        projects = projects.len(),
        path = %path.display(),
        "report generated"
    );

    Ok(ReportOutcome {
        path,
        calculated,
        summary,
        forecast,
    })
}

pub fn print_outcome(outcome: &ReportOutcome) {
    let summary = &outcome.summary;
    println!(
        "{} (as of {})",
        month_label(summary.month_start),
        summary.as_of_date
    );
    println!("  Total hours: {:.0}h", summary.total_hours);
    println!("  Completed:   {:.0}h", summary.complete_hours);
    println!("  Remaining:   {:.0}h", summary.remaining_hours);
    println!(
        "  Projects: {}, people: {}",
        summary.project_count(),
        summary.people_count()
    );
    if let Some(forecast) = &outcome.forecast {
        for month in &forecast.months {
            println!(
                "  Forecast {}: {:.0}h",
                month_label(month.month_start),
                month.total_hours
            );
        }
    }
    println!("Report saved to {}", outcome.path.display());
}
