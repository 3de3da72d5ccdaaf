use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use tempfile::TempDir;
use vans_reporter_lib::commands::report::{run_report, ReportArgs};
use vans_reporter_lib::commands::AppState;
use vans_reporter_lib::error::AppError;
use vans_reporter_lib::models::project::{EditingRange, FilmingDate, Project};
use vans_reporter_lib::models::settings::AppSettings;
use vans_reporter_lib::services::token_service::TokenStore;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

fn february_projects() -> Vec<Project> {
    vec![
        Project::new("1", "Van Talent - Foundation", "Working on it")
            .with_people(["Rolf Wiberg"])
            .with_filming(FilmingDate::with_slot(date(2, 5), "AM"))
            .with_filming(FilmingDate::with_slot(date(2, 12), "PM"))
            .with_editing(EditingRange::new(date(2, 3), date(2, 14)))
            .with_editing(EditingRange::new(date(2, 17), date(2, 25))),
        Project::new("2", "Vito Sport X", "Working on it")
            .with_people(["Rolf Wiberg", "George Pratt"])
            .with_filming(FilmingDate::with_slot(date(2, 12), "AM"))
            .with_editing(EditingRange::new(date(2, 10), date(2, 20))),
        Project::new("3", "Vans Monthly Call", "Working on it")
            .with_people(["Rolf Wiberg", "Simon Jeffery"])
            .with_filming(FilmingDate::with_slot(date(2, 13), "AM"))
            .with_filming(FilmingDate::with_slot(date(2, 19), "PM"))
            .with_editing(EditingRange::new(date(2, 14), date(2, 21))),
    ]
}

struct Fixture {
    dir: TempDir,
    state: AppState,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("projects.json");
        fs::write(&input, serde_json::to_string_pretty(&february_projects()).unwrap()).unwrap();

        let token_store = TokenStore::new(dir.path().join("token.json"));
        let state = AppState::new(AppSettings::default(), token_store);
        Self { dir, state }
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    fn args(&self, output: &str) -> ReportArgs {
        ReportArgs {
            as_of: Some(date(2, 16)),
            output: self.path(output),
            forecast_months: Some(0),
            input: Some(self.path("projects.json")),
            set_project: Vec::new(),
            set_person: Vec::new(),
        }
    }
}

fn no_prompt() -> vans_reporter_lib::error::AppResult<Option<String>> {
    panic!("a file-backed report must not ask for a token")
}

fn read_json(path: &Path) -> JsonValue {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn json_report_from_project_file() {
    let fixture = Fixture::new();

    let outcome = run_report(&fixture.state, fixture.args("report.json"), no_prompt)
        .await
        .unwrap();

    assert_eq!(outcome.path, fixture.path("report.json"));
    assert!(outcome.forecast.is_none());
    assert!((outcome.summary.total_hours - 252.0).abs() < 1e-6);

    let report = read_json(&outcome.path);
    assert_eq!(report["month"], "Feb 2026");
    assert_eq!(report["asOfDate"], "2026-02-16");
    assert_eq!(report["monthStart"], "2026-02-01");
    assert_eq!(report["monthEnd"], "2026-02-28");
    assert!((report["totalHours"].as_f64().unwrap() - 252.0).abs() < 1e-6);
    assert!((report["completeHours"].as_f64().unwrap() - 132.0).abs() < 1e-6);
    assert!(report.get("forecast").is_none());

    let people: Vec<&str> = report["people"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(people, vec!["Rolf Wiberg", "George Pratt", "Simon Jeffery"]);
    assert_eq!(report["projects"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn markdown_report_with_forecast() {
    let fixture = Fixture::new();
    let mut args = fixture.args("out/report.md");
    args.forecast_months = Some(2);

    let outcome = run_report(&fixture.state, args, no_prompt).await.unwrap();
    let forecast = outcome.forecast.as_ref().unwrap();
    assert_eq!(forecast.months.len(), 2);
    assert_eq!(forecast.total_hours(), 0.0);

    let markdown = fs::read_to_string(&outcome.path).unwrap();
    assert!(markdown.starts_with("# Vans Department Report: Feb 2026"));
    assert!(markdown.contains("As of Monday, 16 February 2026."));
    assert!(markdown.contains("| Rolf Wiberg | 136h | 80h | 56h |"));
    assert!(markdown.contains("| Feb 2026 (Current) | 3 | 3 | 252h |"));
    assert!(markdown.contains("| Mar 2026 | 0 | 0 | 0h |"));
    assert!(markdown.contains("| Apr 2026 | 0 | 0 | 0h |"));
}

#[tokio::test]
async fn overrides_reshape_report_but_not_calculation() {
    let fixture = Fixture::new();
    let mut args = fixture.args("report.json");
    args.set_project = vec!["Vito Sport X=96".to_string()];
    args.set_person = vec!["Simon Jeffery/Vans Monthly Call=40".to_string()];

    let outcome = run_report(&fixture.state, args, no_prompt).await.unwrap();

    let calculated = &outcome.calculated;
    assert!((calculated.total_hours - 252.0).abs() < 1e-6);
    assert!((calculated.projects["Vito Sport X"] - (100.0 + 2.0 / 3.0)).abs() < 1e-6);

    let summary = &outcome.summary;
    assert_eq!(summary.projects["Vito Sport X"], 96.0);
    assert_eq!(summary.people["George Pratt"].project_hours["Vito Sport X"], 68.7);
    assert_eq!(summary.people["Rolf Wiberg"].project_hours["Vito Sport X"], 27.3);
    assert_eq!(summary.people["Simon Jeffery"].total_hours, 40.0);
    assert_eq!(summary.projects["Vans Monthly Call"], 58.7);
    assert!((summary.total_hours - 243.4).abs() < 1e-6);

    let report = read_json(&outcome.path);
    assert!((report["totalHours"].as_f64().unwrap() - 243.4).abs() < 1e-6);
}

#[tokio::test]
async fn malformed_override_fails_before_writing() {
    let fixture = Fixture::new();
    let mut args = fixture.args("report.json");
    args.set_project = vec!["Vito Sport X".to_string()];

    let error = run_report(&fixture.state, args, no_prompt).await.unwrap_err();
    assert!(matches!(error, AppError::Validation { .. }));
    assert!(!fixture.path("report.json").exists());
}

#[tokio::test]
async fn override_for_unknown_project_is_not_found() {
    let fixture = Fixture::new();
    let mut args = fixture.args("report.json");
    args.set_project = vec!["Nonexistent Project=10".to_string()];

    let error = run_report(&fixture.state, args, no_prompt).await.unwrap_err();
    assert!(matches!(error, AppError::NotFound(_)));
}

#[tokio::test]
async fn missing_project_file_is_an_io_error() {
    let fixture = Fixture::new();
    let mut args = fixture.args("report.json");
    args.input = Some(fixture.path("missing.json"));

    let error = run_report(&fixture.state, args, no_prompt).await.unwrap_err();
    assert!(matches!(error, AppError::Io(_)));
}

#[tokio::test]
async fn oversized_forecast_is_rejected_before_any_work() {
    let fixture = Fixture::new();
    let mut args = fixture.args("report.json");
    args.forecast_months = Some(u32::MAX);

    let error = run_report(&fixture.state, args, no_prompt).await.unwrap_err();
    assert!(matches!(error, AppError::Validation { .. }));
    assert!(!fixture.path("report.json").exists());
}
