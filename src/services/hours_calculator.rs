use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::project::Project;
use crate::models::settings::HoursPolicy;
use crate::models::summary::ProjectSummary;
use crate::services::aggregator::aggregate_hours;
use crate::services::calendar_utils::month_window;
use crate::services::conflict_resolver::resolve_conflicts;
use crate::services::schedule_builder::build_daily_schedule;

/// Turns projects into a monthly hours summary for the month containing the as-of date.
#[derive(Debug, Clone, Default)]
pub struct HoursCalculator {
    policy: HoursPolicy,
}

impl HoursCalculator {
    pub fn new(policy: HoursPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &HoursPolicy {
        &self.policy
    }

    /// Builds the daily schedule, resolves same-day conflicts and aggregates the result.
    ///
    /// Only dates inside the calendar month of `as_of_date` are counted. The inputs are only
    /// read, and the returned summary is freshly allocated, so calls may run concurrently.
    pub fn calculate_project_hours(
        &self,
        projects: &[Project],
        as_of_date: NaiveDate,
    ) -> ProjectSummary {
        let window = month_window(as_of_date);

        let schedule = build_daily_schedule(projects, window, &self.policy);
        debug!(
            target: "app::calculator",
            person_days = schedule.len(),
            month_start = %window.start,
            month_end = %window.end,
            "built daily schedule"
        );

        let resolved = resolve_conflicts(&schedule, &self.policy);
        let summary = aggregate_hours(&resolved, as_of_date);
        debug_assert_eq!(summary.month_start, window.start);
        debug_assert_eq!(summary.month_end, window.end);

        info!(
            target: "app::calculator",
            as_of = %as_of_date,
            projects = summary.project_count(),
            people = summary.people_count(),
            total_hours = summary.total_hours,
            complete_hours = summary.complete_hours,
            remaining_hours = summary.remaining_hours,
            "calculated project hours"
        );

        summary
    }
}
