use chrono::NaiveDate;
use tracing::{info, warn};

use crate::models::project::Project;
use crate::models::summary::ForecastSummary;
use crate::services::calendar_utils::{last_day_of_month, month_label, shift_months};
use crate::services::hours_calculator::HoursCalculator;

/// Runs the monthly calculation for the months following a start month.
#[derive(Debug, Clone, Default)]
pub struct ForecastService {
    calculator: HoursCalculator,
}

impl ForecastService {
    pub fn new(calculator: HoursCalculator) -> Self {
        Self { calculator }
    }

    /// Computes one summary per month for the `months` calendar months after the month
    /// containing `start`. Each month is evaluated as of its last day and shares no state
    /// with the others.
    pub fn generate_forecast(
        &self,
        projects: &[Project],
        start: NaiveDate,
        months: u32,
    ) -> ForecastSummary {
        let start_month = shift_months(start, 0).unwrap_or(start);
        let mut summaries = Vec::new();

        for offset in 1..=months {
            let Some(month_start) = shift_months(start, offset) else {
                warn!(
                    target: "app::forecast",
                    offset,
                    "forecast month out of calendar range, stopping"
                );
                break;
            };
            let as_of = last_day_of_month(month_start);
            let summary = self.calculator.calculate_project_hours(projects, as_of);

            info!(
                target: "app::forecast",
                "Forecast for {}: total_hours={:.1}, projects={}, people={}",
                month_label(month_start),
                summary.total_hours,
                summary.project_count(),
                summary.people_count()
            );
            summaries.push(summary);
        }

        ForecastSummary {
            start_month,
            months: summaries,
        }
    }
}
