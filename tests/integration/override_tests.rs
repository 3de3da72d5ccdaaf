use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use vans_reporter_lib::error::AppError;
use vans_reporter_lib::models::overrides::HoursOverride;
use vans_reporter_lib::models::project::{EditingRange, FilmingDate, Project};
use vans_reporter_lib::models::summary::ProjectSummary;
use vans_reporter_lib::services::hours_calculator::HoursCalculator;
use vans_reporter_lib::services::summary_editor::{apply_override, SummaryEditor};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
}

fn calculated_summary() -> Arc<ProjectSummary> {
    let projects = vec![
        Project::new("1", "Shoot Day", "Working on it")
            .with_people(["Rolf Wiberg", "George Pratt"])
            .with_filming(FilmingDate::new(date(4)))
            .with_filming(FilmingDate::new(date(18))),
        Project::new("2", "Edit Week", "Working on it")
            .with_people(["Rolf Wiberg"])
            .with_editing(EditingRange::new(date(9), date(13))),
    ];
    Arc::new(HoursCalculator::default().calculate_project_hours(&projects, date(11)))
}

fn assert_consistent(summary: &ProjectSummary) {
    let projects: f64 = summary.projects.values().sum();
    let people: f64 = summary.people.values().map(|p| p.total_hours).sum();
    assert!((projects - summary.total_hours).abs() < 0.05 + 1e-9);
    assert!((people - summary.total_hours).abs() < 0.05 + 1e-9);
    assert!(
        (summary.complete_hours + summary.remaining_hours - summary.total_hours).abs() < 0.05 + 1e-9
    );
}

#[test]
fn test_calculated_baseline() {
    let summary = calculated_summary();
    // Shoot Day: 2 people x 2 days x 4h. Edit Week: 5 weekdays x 8h.
    assert_eq!(summary.projects["Shoot Day"], 16.0);
    assert_eq!(summary.projects["Edit Week"], 40.0);
    assert_eq!(summary.projects_complete["Edit Week"], 24.0);
    assert_eq!(summary.total_hours, 56.0);
}

#[test]
fn test_project_override_rescales_splits_and_totals() {
    let base = calculated_summary();
    let edited = apply_override(
        &base,
        &HoursOverride::ProjectTotal {
            project: "Edit Week".into(),
            hours: 30.0,
        },
    )
    .unwrap();

    let rolf = &edited.people["Rolf Wiberg"];
    assert_eq!(rolf.project_hours["Edit Week"], 30.0);
    assert_eq!(rolf.project_hours_complete["Edit Week"], 18.0);
    assert_eq!(rolf.project_hours_remaining["Edit Week"], 12.0);
    assert_eq!(rolf.total_hours, 38.0);
    assert_eq!(edited.projects["Edit Week"], 30.0);
    assert_eq!(edited.total_hours, 46.0);
    assert_consistent(&edited);

    assert_eq!(base.projects["Edit Week"], 40.0);
}

#[test]
fn test_person_override_leaves_other_people_alone() {
    let base = calculated_summary();
    let edited = apply_override(
        &base,
        &HoursOverride::parse_person("George Pratt/Shoot Day=2").unwrap(),
    )
    .unwrap();

    let george = &edited.people["George Pratt"];
    assert_eq!(george.total_hours, 2.0);
    assert_eq!(george.complete_hours, 1.0);
    assert_eq!(george.remaining_hours, 1.0);
    assert_eq!(edited.people["Rolf Wiberg"].project_hours["Shoot Day"], 8.0);
    assert_eq!(edited.projects["Shoot Day"], 10.0);
    assert_consistent(&edited);
}

#[test]
fn test_zero_hour_project_override_keeps_values() {
    let base = calculated_summary();
    let zeroed = apply_override(
        &base,
        &HoursOverride::parse_project("Shoot Day=0").unwrap(),
    )
    .unwrap();
    assert_eq!(zeroed.projects["Shoot Day"], 0.0);
    assert_eq!(zeroed.total_hours, 40.0);

    // Scaling from zero has no ratio to apply, so the values stay at zero.
    let restored = apply_override(
        &zeroed,
        &HoursOverride::parse_project("Shoot Day=12").unwrap(),
    )
    .unwrap();
    assert_eq!(restored.projects["Shoot Day"], 0.0);
    assert_consistent(&restored);
}

#[test]
fn test_editor_replays_remaining_overrides_on_undo() {
    let base = calculated_summary();
    let mut editor = SummaryEditor::new(Arc::clone(&base));

    editor
        .apply(HoursOverride::parse_project("Edit Week=20").unwrap())
        .unwrap();
    editor
        .apply(HoursOverride::parse_person("Rolf Wiberg/Shoot Day=4").unwrap())
        .unwrap();
    assert_eq!(editor.current().total_hours, 32.0);

    // A rejected edit leaves the current summary and log untouched.
    let rejected = editor.apply(HoursOverride::parse_project("Unknown=1").unwrap());
    assert!(matches!(rejected, Err(AppError::NotFound(_))));
    assert_eq!(editor.overrides().len(), 2);
    assert_eq!(editor.current().total_hours, 32.0);

    editor.undo().unwrap();
    assert_eq!(editor.current().total_hours, 36.0);
    assert_eq!(editor.current().projects["Shoot Day"], 16.0);

    editor.undo().unwrap();
    assert_eq!(editor.current(), base.as_ref());
    assert!(Arc::ptr_eq(editor.base(), &base));
}

#[test]
fn test_override_parsing_and_wire_format() {
    let edit = HoursOverride::parse_project("Van Talent - Foundation = 88.5").unwrap();
    assert_eq!(
        serde_json::to_value(&edit).unwrap(),
        json!({ "kind": "projectTotal", "project": "Van Talent - Foundation", "hours": 88.5 })
    );

    let edit = HoursOverride::parse_person("Rolf Wiberg/Vito Sport X=12").unwrap();
    assert_eq!(
        serde_json::to_value(&edit).unwrap(),
        json!({
            "kind": "personProject",
            "person": "Rolf Wiberg",
            "project": "Vito Sport X",
            "hours": 12.0
        })
    );

    for bad in ["=5", "Shoot Day=", "Shoot Day=lots"] {
        assert!(matches!(
            HoursOverride::parse_project(bad),
            Err(AppError::Validation { .. })
        ));
    }
    assert!(matches!(
        HoursOverride::parse_person("Shoot Day=5"),
        Err(AppError::Validation { .. })
    ));
}
