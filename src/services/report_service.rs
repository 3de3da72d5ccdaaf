use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::summary::{percent_of, ForecastSummary, ProjectSummary};
use crate::services::calendar_utils::month_label;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub name: String,
    pub total_hours: f64,
    pub complete_hours: f64,
    pub remaining_hours: f64,
    pub completion_percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRow {
    pub name: String,
    pub total_hours: f64,
    pub complete_hours: f64,
    pub remaining_hours: f64,
    pub projects: BTreeMap<String, f64>,
    pub projects_complete: BTreeMap<String, f64>,
    pub projects_remaining: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    pub label: String,
    pub is_current: bool,
    pub project_count: usize,
    pub people_count: usize,
    pub total_hours: f64,
}

/// Read-only projection of a summary, shaped for rendering.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub month: String,
    pub as_of_date: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub total_hours: f64,
    pub complete_hours: f64,
    pub remaining_hours: f64,
    pub completion_percent: f64,
    pub projects: Vec<ProjectRow>,
    pub people: Vec<PersonRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub forecast: Vec<MonthRow>,
}

impl ReportView {
    pub fn build(summary: &ProjectSummary, forecast: Option<&ForecastSummary>) -> Self {
        let projects = summary
            .projects
            .iter()
            .map(|(name, &total)| {
                let complete = summary.projects_complete.get(name).copied().unwrap_or(0.0);
                ProjectRow {
                    name: name.clone(),
                    total_hours: total,
                    complete_hours: complete,
                    remaining_hours: summary.projects_remaining.get(name).copied().unwrap_or(0.0),
                    completion_percent: percent_of(complete, total),
                }
            })
            .collect();

        let mut people: Vec<PersonRow> = summary
            .people
            .values()
            .map(|person| PersonRow {
                name: person.name.clone(),
                total_hours: person.total_hours,
                complete_hours: person.complete_hours,
                remaining_hours: person.remaining_hours,
                projects: person.project_hours.clone(),
                projects_complete: person.project_hours_complete.clone(),
                projects_remaining: person.project_hours_remaining.clone(),
            })
            .collect();
        people.sort_by(|a, b| {
            b.total_hours
                .total_cmp(&a.total_hours)
                .then_with(|| a.name.cmp(&b.name))
        });

        let forecast = forecast
            .filter(|forecast| !forecast.is_empty())
            .map(|forecast| {
                std::iter::once(month_row(summary, true))
                    .chain(forecast.months.iter().map(|month| month_row(month, false)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            month: month_label(summary.month_start),
            as_of_date: summary.as_of_date,
            month_start: summary.month_start,
            month_end: summary.month_end,
            total_hours: summary.total_hours,
            complete_hours: summary.complete_hours,
            remaining_hours: summary.remaining_hours,
            completion_percent: summary.completion_percent(),
            projects,
            people,
            forecast,
        }
    }
}

fn month_row(summary: &ProjectSummary, is_current: bool) -> MonthRow {
    MonthRow {
        label: month_label(summary.month_start),
        is_current,
        project_count: summary.project_count(),
        people_count: summary.people_count(),
        total_hours: summary.total_hours,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("md") | Some("markdown") => ReportFormat::Markdown,
            _ => ReportFormat::Json,
        }
    }

    pub fn renderer(self) -> Box<dyn ReportRenderer> {
        match self {
            ReportFormat::Json => Box::new(JsonRenderer),
            ReportFormat::Markdown => Box::new(MarkdownRenderer),
        }
    }
}

pub trait ReportRenderer {
    fn render(&self, view: &ReportView) -> AppResult<String>;
}

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, view: &ReportView) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}

pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, view: &ReportView) -> AppResult<String> {
        let mut out = String::new();
        write_markdown(&mut out, view)
            .map_err(|err| AppError::other(format!("failed to render report: {err}")))?;
        Ok(out)
    }
}

fn write_markdown(out: &mut String, view: &ReportView) -> std::fmt::Result {
    writeln!(out, "# Vans Department Report: {}", view.month)?;
    writeln!(out)?;
    writeln!(
        out,
        "As of {}. Total {:.0}h, completed {:.0}h, remaining {:.0}h ({:.0}% complete).",
        view.as_of_date.format("%A, %-d %B %Y"),
        view.total_hours,
        view.complete_hours,
        view.remaining_hours,
        view.completion_percent
    )?;

    writeln!(out)?;
    writeln!(out, "## Projects")?;
    writeln!(out)?;
    writeln!(out, "| Project | Total | Completed | Remaining | Progress |")?;
    writeln!(out, "|---|---:|---:|---:|---:|")?;
    for row in &view.projects {
        writeln!(
            out,
            "| {} | {:.0}h | {:.0}h | {:.0}h | {:.0}% |",
            cell(&row.name),
            row.total_hours,
            row.complete_hours,
            row.remaining_hours,
            row.completion_percent
        )?;
    }

    writeln!(out)?;
    writeln!(out, "## Team")?;
    writeln!(out)?;
    writeln!(out, "| Name | Total | Completed | Remaining |")?;
    writeln!(out, "|---|---:|---:|---:|")?;
    for row in &view.people {
        writeln!(
            out,
            "| {} | {:.0}h | {:.0}h | {:.0}h |",
            cell(&row.name),
            row.total_hours,
            row.complete_hours,
            row.remaining_hours
        )?;
    }

    let month = view.month_start.format("%b");
    writeln!(out)?;
    writeln!(
        out,
        "## Hours Completed So Far ({}-{} {})",
        view.month_start.day(),
        view.as_of_date.day(),
        month
    )?;
    writeln!(out)?;
    write_split_table(out, view, Split::Complete)?;

    writeln!(out)?;
    writeln!(
        out,
        "## Remaining Hours ({}-{} {})",
        view.as_of_date.day() + 1,
        view.month_end.day(),
        month
    )?;
    writeln!(out)?;
    write_split_table(out, view, Split::Remaining)?;

    if !view.forecast.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Forecast")?;
        writeln!(out)?;
        writeln!(out, "| Month | Projects | Team Members | Total Hours |")?;
        writeln!(out, "|---|---:|---:|---:|")?;
        for row in &view.forecast {
            let suffix = if row.is_current { " (Current)" } else { "" };
            writeln!(
                out,
                "| {}{} | {} | {} | {:.0}h |",
                row.label, suffix, row.project_count, row.people_count, row.total_hours
            )?;
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum Split {
    Complete,
    Remaining,
}

impl Split {
    fn person_total(self, row: &PersonRow) -> f64 {
        match self {
            Split::Complete => row.complete_hours,
            Split::Remaining => row.remaining_hours,
        }
    }

    fn person_projects(self, row: &PersonRow) -> &BTreeMap<String, f64> {
        match self {
            Split::Complete => &row.projects_complete,
            Split::Remaining => &row.projects_remaining,
        }
    }

    fn project_total(self, row: &ProjectRow) -> f64 {
        match self {
            Split::Complete => row.complete_hours,
            Split::Remaining => row.remaining_hours,
        }
    }

    fn grand_total(self, view: &ReportView) -> f64 {
        match self {
            Split::Complete => view.complete_hours,
            Split::Remaining => view.remaining_hours,
        }
    }
}

/// Person by project matrix for one side of the as-of split, largest contributor first,
/// closed by a TOTAL row.
fn write_split_table(out: &mut String, view: &ReportView, split: Split) -> std::fmt::Result {
    write!(out, "| Team Member |")?;
    for project in &view.projects {
        write!(out, " {} |", cell(&project.name))?;
    }
    writeln!(out, " Total |")?;
    writeln!(out, "|---|{}---:|", "---:|".repeat(view.projects.len()))?;

    let mut people: Vec<&PersonRow> = view.people.iter().collect();
    people.sort_by(|a, b| {
        split
            .person_total(b)
            .total_cmp(&split.person_total(a))
            .then_with(|| a.name.cmp(&b.name))
    });

    for person in people {
        write!(out, "| {} |", cell(&person.name))?;
        for project in &view.projects {
            let hours = split
                .person_projects(person)
                .get(&project.name)
                .copied()
                .unwrap_or(0.0);
            if hours > 0.0 {
                write!(out, " {:.0}h |", hours)?;
            } else {
                write!(out, " - |")?;
            }
        }
        writeln!(out, " {:.0}h |", split.person_total(person))?;
    }

    write!(out, "| TOTAL |")?;
    for project in &view.projects {
        write!(out, " {:.0}h |", split.project_total(project))?;
    }
    writeln!(out, " {:.0}h |", split.grand_total(view))
}

/// Escapes characters that would end a Markdown table cell.
fn cell(text: &str) -> Cow<'_, str> {
    if text.contains('|') {
        Cow::Owned(text.replace('|', "\\|"))
    } else {
        Cow::Borrowed(text)
    }
}

pub struct ReportService;

impl ReportService {
    /// Renders the report in the format implied by `path` and writes it there.
    pub fn write_report(
        path: &Path,
        summary: &ProjectSummary,
        forecast: Option<&ForecastSummary>,
    ) -> AppResult<PathBuf> {
        let format = ReportFormat::from_path(path);
        let view = ReportView::build(summary, forecast);
        let rendered = format.renderer().render(&view)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, rendered)?;

        info!(
            target: "app::report",
            path = %path.display(),
            format = ?format,
            "report written"
        );
        Ok(path.to_path_buf())
    }
}
