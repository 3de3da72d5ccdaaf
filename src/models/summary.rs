use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hours breakdown for a single person.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonHours {
    pub name: String,
    pub project_hours: BTreeMap<String, f64>,
    pub project_hours_complete: BTreeMap<String, f64>,
    pub project_hours_remaining: BTreeMap<String, f64>,
    pub total_hours: f64,
    pub complete_hours: f64,
    pub remaining_hours: f64,
}

impl PersonHours {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Credits `hours` on `project`, into the complete or remaining side.
    pub fn record(&mut self, project: &str, hours: f64, complete: bool) {
        self.total_hours += hours;
        *self.project_hours.entry(project.to_string()).or_insert(0.0) += hours;

        if complete {
            self.complete_hours += hours;
            *self
                .project_hours_complete
                .entry(project.to_string())
                .or_insert(0.0) += hours;
        } else {
            self.remaining_hours += hours;
            *self
                .project_hours_remaining
                .entry(project.to_string())
                .or_insert(0.0) += hours;
        }
    }
}

/// Computed hours for one month, split at the as-of date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub projects: BTreeMap<String, f64>,
    pub projects_complete: BTreeMap<String, f64>,
    pub projects_remaining: BTreeMap<String, f64>,
    pub people: BTreeMap<String, PersonHours>,
    pub total_hours: f64,
    pub complete_hours: f64,
    pub remaining_hours: f64,
    pub as_of_date: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
}

impl ProjectSummary {
    pub fn empty(as_of_date: NaiveDate, month_start: NaiveDate, month_end: NaiveDate) -> Self {
        Self {
            projects: BTreeMap::new(),
            projects_complete: BTreeMap::new(),
            projects_remaining: BTreeMap::new(),
            people: BTreeMap::new(),
            total_hours: 0.0,
            complete_hours: 0.0,
            remaining_hours: 0.0,
            as_of_date,
            month_start,
            month_end,
        }
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }

    pub fn completion_percent(&self) -> f64 {
        percent_of(self.complete_hours, self.total_hours)
    }

    pub fn project_completion_percent(&self, project: &str) -> f64 {
        let total = self.projects.get(project).copied().unwrap_or(0.0);
        let complete = self.projects_complete.get(project).copied().unwrap_or(0.0);
        percent_of(complete, total)
    }
}

/// Independent per-month summaries for the months after a start month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub start_month: NaiveDate,
    pub months: Vec<ProjectSummary>,
}

impl ForecastSummary {
    pub fn total_hours(&self) -> f64 {
        self.months.iter().map(|month| month.total_hours).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Share of `part` in `whole` as a percentage; 0 when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
