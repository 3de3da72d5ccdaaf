use tracing::debug;

use crate::models::project::Project;
use crate::models::schedule::{ActivityKind, Commitment, DailySchedule, MonthWindow, PersonDay};
use crate::models::settings::HoursPolicy;
use crate::services::calendar_utils::{is_weekday, weekdays_in_range};

/// Expands filming dates and editing ranges into per-person-day commitments inside `window`.
///
/// Filming dates count only on weekdays inside the window. Editing ranges are clipped to the
/// window and contribute one commitment per weekday. Each filming date and each editing range
/// contributes on its own, so two overlapping ranges of one project yield two commitments.
pub fn build_daily_schedule(
    projects: &[Project],
    window: MonthWindow,
    policy: &HoursPolicy,
) -> DailySchedule {
    let mut schedule = DailySchedule::new();

    for project in projects {
        for filming in &project.filming_dates {
            if !is_weekday(filming.date) || !window.contains(filming.date) {
                continue;
            }
            for person in &project.assigned_people {
                push_commitment(
                    &mut schedule,
                    person,
                    filming.date,
                    &project.name,
                    ActivityKind::Filming,
                    policy.filming_hours_per_day,
                );
            }
        }

        for range in &project.editing_ranges {
            let Some((start, end)) = window.clip(range.start_date, range.end_date) else {
                debug!(
                    target: "app::calculator",
                    project = %project.name,
                    start = %range.start_date,
                    end = %range.end_date,
                    "editing range outside month window"
                );
                continue;
            };

            for day in weekdays_in_range(start, end) {
                for person in &project.assigned_people {
                    push_commitment(
                        &mut schedule,
                        person,
                        day,
                        &project.name,
                        ActivityKind::Editing,
                        policy.editing_hours_per_day,
                    );
                }
            }
        }
    }

    schedule
}

fn push_commitment(
    schedule: &mut DailySchedule,
    person: &str,
    date: chrono::NaiveDate,
    project: &str,
    kind: ActivityKind,
    nominal_hours: f64,
) {
    schedule
        .entry(PersonDay {
            person: person.to_string(),
            date,
        })
        .or_default()
        .push(Commitment {
            project: project.to_string(),
            kind,
            nominal_hours,
        });
}
