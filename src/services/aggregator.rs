use chrono::NaiveDate;

use crate::models::schedule::ResolvedAllocations;
use crate::models::summary::{PersonHours, ProjectSummary};
use crate::services::calendar_utils::month_bounds;

/// Sums resolved allocations into project and person totals, split at `as_of_date`.
///
/// An allocation dated on or before `as_of_date` is complete, anything later is remaining.
/// Project and person aggregates are both updated in the same pass over the allocations.
pub fn aggregate_hours(resolved: &ResolvedAllocations, as_of_date: NaiveDate) -> ProjectSummary {
    let (month_start, month_end) = month_bounds(as_of_date);
    let mut summary = ProjectSummary::empty(as_of_date, month_start, month_end);

    for (key, &hours) in resolved {
        let complete = key.date <= as_of_date;

        *summary.projects.entry(key.project.clone()).or_insert(0.0) += hours;
        let split = if complete {
            &mut summary.projects_complete
        } else {
            &mut summary.projects_remaining
        };
        *split.entry(key.project.clone()).or_insert(0.0) += hours;

        summary
            .people
            .entry(key.person.clone())
            .or_insert_with(|| PersonHours::new(key.person.clone()))
            .record(&key.project, hours, complete);
    }

    summary.total_hours = summary.projects.values().sum();
    summary.complete_hours = summary.projects_complete.values().sum();
    summary.remaining_hours = summary.projects_remaining.values().sum();

    summary
}
