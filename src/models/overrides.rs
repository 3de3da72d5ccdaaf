use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};

/// A manual correction applied to a computed summary before it is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HoursOverride {
    /// Rescales every person's hours on `project` so the project total becomes `hours`.
    ProjectTotal { project: String, hours: f64 },
    /// Sets one person's hours on one project.
    PersonProject {
        person: String,
        project: String,
        hours: f64,
    },
}

impl HoursOverride {
    pub fn hours(&self) -> f64 {
        match self {
            HoursOverride::ProjectTotal { hours, .. } => *hours,
            HoursOverride::PersonProject { hours, .. } => *hours,
        }
    }

    /// Parses `Project Name=120`.
    pub fn parse_project(input: &str) -> AppResult<Self> {
        let (project, hours) = split_assignment(input)?;
        Ok(HoursOverride::ProjectTotal {
            project: project.to_string(),
            hours,
        })
    }

    /// Parses `Person Name/Project Name=40`.
    pub fn parse_person(input: &str) -> AppResult<Self> {
        let (target, hours) = split_assignment(input)?;
        let (person, project) = target
            .split_once('/')
            .map(|(person, project)| (person.trim(), project.trim()))
            .filter(|(person, project)| !person.is_empty() && !project.is_empty())
            .ok_or_else(|| {
                AppError::validation_with_details(
                    "person override must look like PERSON/PROJECT=HOURS",
                    json!({ "value": input }),
                )
            })?;
        Ok(HoursOverride::PersonProject {
            person: person.to_string(),
            project: project.to_string(),
            hours,
        })
    }
}

fn split_assignment(input: &str) -> AppResult<(&str, f64)> {
    let (name, raw_hours) = input
        .rsplit_once('=')
        .map(|(name, hours)| (name.trim(), hours.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| {
            AppError::validation_with_details(
                "override must look like NAME=HOURS",
                json!({ "value": input }),
            )
        })?;
    let hours = raw_hours.parse::<f64>().map_err(|err| {
        AppError::validation_with_details(
            "override hours must be a number",
            json!({ "value": input, "error": err.to_string() }),
        )
    })?;
    Ok((name, hours))
}
