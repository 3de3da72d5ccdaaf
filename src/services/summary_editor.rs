use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::overrides::HoursOverride;
use crate::models::summary::ProjectSummary;

/// Applies manual overrides to a computed summary without touching the original.
///
/// The computed summary is shared behind an `Arc` and never mutated. Every edit produces a new
/// value, and all totals are re-derived from the per-person per-project figures.
#[derive(Debug, Clone)]
pub struct SummaryEditor {
    base: Arc<ProjectSummary>,
    overrides: Vec<HoursOverride>,
    current: ProjectSummary,
}

impl SummaryEditor {
    pub fn new(base: Arc<ProjectSummary>) -> Self {
        let current = (*base).clone();
        Self {
            base,
            overrides: Vec::new(),
            current,
        }
    }

    pub fn base(&self) -> &Arc<ProjectSummary> {
        &self.base
    }

    pub fn current(&self) -> &ProjectSummary {
        &self.current
    }

    pub fn overrides(&self) -> &[HoursOverride] {
        &self.overrides
    }

    pub fn apply(&mut self, edit: HoursOverride) -> AppResult<&ProjectSummary> {
        self.current = apply_override(&self.current, &edit)?;
        info!(target: "app::overrides", edit = ?edit, "override applied");
        self.overrides.push(edit);
        Ok(&self.current)
    }

    /// Drops the most recent override and rebuilds the summary from the base.
    pub fn undo(&mut self) -> AppResult<Option<HoursOverride>> {
        let Some(removed) = self.overrides.pop() else {
            return Ok(None);
        };

        let mut rebuilt = (*self.base).clone();
        for edit in &self.overrides {
            rebuilt = apply_override(&rebuilt, edit)?;
        }
        self.current = rebuilt;
        debug!(target: "app::overrides", remaining = self.overrides.len(), "override undone");
        Ok(Some(removed))
    }

    pub fn into_summary(self) -> ProjectSummary {
        self.current
    }
}

/// Returns a copy of `summary` with `edit` applied and every total recalculated.
pub fn apply_override(summary: &ProjectSummary, edit: &HoursOverride) -> AppResult<ProjectSummary> {
    let hours = edit.hours();
    if !hours.is_finite() || hours < 0.0 {
        return Err(AppError::validation_with_details(
            "override hours must be a non-negative number",
            json!({ "hours": hours }),
        ));
    }

    let mut next = summary.clone();
    match edit {
        HoursOverride::ProjectTotal { project, hours } => {
            let old = next
                .projects
                .get(project)
                .copied()
                .ok_or_else(|| AppError::not_found(format!("project {project}")))?;
            let ratio = scale_ratio(*hours, old);

            for person in next.people.values_mut() {
                if let Some(value) = person.project_hours.get_mut(project) {
                    *value = round_tenth(*value * ratio);
                    scale_entry(&mut person.project_hours_complete, project, ratio);
                    scale_entry(&mut person.project_hours_remaining, project, ratio);
                }
            }
        }
        HoursOverride::PersonProject {
            person,
            project,
            hours,
        } => {
            let person_hours = next
                .people
                .get_mut(person)
                .ok_or_else(|| AppError::not_found(format!("person {person}")))?;
            let value = person_hours
                .project_hours
                .get_mut(project)
                .ok_or_else(|| AppError::not_found(format!("project {project} for {person}")))?;
            let ratio = scale_ratio(*hours, *value);
            *value = round_tenth(*hours);
            scale_entry(&mut person_hours.project_hours_complete, project, ratio);
            scale_entry(&mut person_hours.project_hours_remaining, project, ratio);
        }
    }

    recalculate_totals(&mut next);
    Ok(next)
}

/// Re-derives person, project and grand totals bottom-up, rounded to one decimal.
pub fn recalculate_totals(summary: &mut ProjectSummary) {
    for person in summary.people.values_mut() {
        person.total_hours = round_tenth(person.project_hours.values().sum());
        person.complete_hours = round_tenth(person.project_hours_complete.values().sum());
        person.remaining_hours = round_tenth(person.project_hours_remaining.values().sum());
    }

    let project_names: Vec<String> = summary.projects.keys().cloned().collect();
    for project in project_names {
        let (mut total, mut complete, mut remaining) = (0.0, 0.0, 0.0);
        for person in summary.people.values() {
            total += person.project_hours.get(&project).copied().unwrap_or(0.0);
            complete += person
                .project_hours_complete
                .get(&project)
                .copied()
                .unwrap_or(0.0);
            remaining += person
                .project_hours_remaining
                .get(&project)
                .copied()
                .unwrap_or(0.0);
        }
        summary.projects.insert(project.clone(), round_tenth(total));
        summary
            .projects_complete
            .insert(project.clone(), round_tenth(complete));
        summary
            .projects_remaining
            .insert(project, round_tenth(remaining));
    }

    summary.total_hours = round_tenth(summary.projects.values().sum());
    summary.complete_hours = round_tenth(summary.projects_complete.values().sum());
    summary.remaining_hours = round_tenth(summary.projects_remaining.values().sum());
}

fn scale_ratio(new_hours: f64, old_hours: f64) -> f64 {
    if old_hours > 0.0 {
        new_hours / old_hours
    } else {
        1.0
    }
}

fn scale_entry(map: &mut BTreeMap<String, f64>, project: &str, ratio: f64) {
    if let Some(value) = map.get_mut(project) {
        *value = round_tenth(*value * ratio);
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
