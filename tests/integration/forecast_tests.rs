use chrono::NaiveDate;
use vans_reporter_lib::models::project::{EditingRange, FilmingDate, Project};
use vans_reporter_lib::models::settings::HoursPolicy;
use vans_reporter_lib::services::forecast_service::ForecastService;
use vans_reporter_lib::services::hours_calculator::HoursCalculator;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn spring_projects() -> Vec<Project> {
    vec![
        // 2026-03-30 .. 2026-04-03: two March weekdays, three April weekdays.
        Project::new("1", "Easter Campaign", "Working on it")
            .with_people(["Rolf Wiberg", "George Pratt"])
            .with_filming(FilmingDate::with_slot(date(2026, 3, 4), "AM"))
            .with_editing(EditingRange::new(date(2026, 3, 30), date(2026, 4, 3))),
        Project::new("2", "Spring Lookbook", "Planned")
            .with_people(["Simon Jeffery"])
            .with_filming(FilmingDate::new(date(2026, 4, 14)))
            .with_filming(FilmingDate::new(date(2026, 5, 2))),
    ]
}

#[test]
fn test_forecast_generates_one_summary_per_following_month() {
    let service = ForecastService::default();
    let forecast = service.generate_forecast(&spring_projects(), date(2026, 2, 16), 3);

    assert_eq!(forecast.start_month, date(2026, 2, 1));
    assert_eq!(forecast.months.len(), 3);

    let march = &forecast.months[0];
    assert_eq!(march.month_start, date(2026, 3, 1));
    assert_eq!(march.month_end, date(2026, 3, 31));
    // Filming on the 4th for two people, plus two editing days each.
    assert_eq!(march.total_hours, 2.0 * 4.0 + 2.0 * 2.0 * 8.0);
    assert_eq!(march.people_count(), 2);

    let april = &forecast.months[1];
    assert_eq!(april.total_hours, 2.0 * 3.0 * 8.0 + 4.0);
    assert_eq!(april.project_count(), 2);
    assert_eq!(april.people_count(), 3);

    // 2026-05-02 is a Saturday, so May carries no hours.
    let may = &forecast.months[2];
    assert_eq!(may.month_start, date(2026, 5, 1));
    assert_eq!(may.total_hours, 0.0);
    assert_eq!(may.people_count(), 0);

    assert_eq!(forecast.total_hours(), 40.0 + 52.0);
}

#[test]
fn test_forecast_does_not_depend_on_day_within_start_month() {
    let service = ForecastService::default();
    let projects = spring_projects();

    let early = service.generate_forecast(&projects, date(2026, 2, 1), 3);
    let late = service.generate_forecast(&projects, date(2026, 2, 28), 3);

    assert_eq!(early, late);
}

#[test]
fn test_forecast_months_are_fully_complete() {
    let forecast =
        ForecastService::default().generate_forecast(&spring_projects(), date(2026, 2, 16), 2);

    for month in &forecast.months {
        assert_eq!(month.as_of_date, month.month_end);
        assert_eq!(month.remaining_hours, 0.0);
        assert_eq!(month.complete_hours, month.total_hours);
    }
}

#[test]
fn test_forecast_month_matches_direct_calculation() {
    let calculator = HoursCalculator::default();
    let service = ForecastService::new(calculator.clone());
    let projects = spring_projects();

    let forecast = service.generate_forecast(&projects, date(2026, 2, 16), 2);
    let april = calculator.calculate_project_hours(&projects, date(2026, 4, 30));

    assert_eq!(forecast.months[1], april);
}

#[test]
fn test_forecast_uses_the_configured_policy() {
    let policy = HoursPolicy {
        filming_hours_per_day: 6.0,
        editing_hours_per_day: 8.0,
        max_hours_per_day: 10.0,
    };
    let service = ForecastService::new(HoursCalculator::new(policy));

    let forecast = service.generate_forecast(&spring_projects(), date(2026, 2, 16), 1);
    assert_eq!(forecast.months[0].total_hours, 2.0 * 6.0 + 2.0 * 2.0 * 8.0);
}

#[test]
fn test_forecast_crosses_year_end() {
    let project = Project::new("1", "New Year Edit", "Working on it")
        .with_people(["George Pratt"])
        .with_editing(EditingRange::new(date(2026, 12, 28), date(2027, 1, 8)));

    let forecast = ForecastService::default().generate_forecast(&[project], date(2026, 11, 10), 2);

    assert_eq!(forecast.months[0].month_start, date(2026, 12, 1));
    assert_eq!(forecast.months[1].month_start, date(2027, 1, 1));
    // Dec 28..31 are Monday to Thursday; Jan 1..8 holds six weekdays.
    assert_eq!(forecast.months[0].total_hours, 32.0);
    assert_eq!(forecast.months[1].total_hours, 48.0);
}
