use std::fs;
use std::path::PathBuf;
use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult, RemoteErrorCode};
use crate::models::project::{EditingRange, FilmingDate, Project};
use crate::models::settings::{BoardColumns, BoardSettings};
use crate::services::calendar_utils::ISO_DATE_FORMAT;

const BOARD_ITEMS_QUERY: &str = r#"
query ($boardId: [ID!], $limit: Int!) {
  boards(ids: $boardId) {
    items_page(limit: $limit) {
      items {
        id
        name
        column_values {
          id
          text
          value
        }
      }
    }
  }
}
"#;

const UNNAMED_PROJECT: &str = "Unnamed Project";
const UNKNOWN_STATUS: &str = "Unknown";

/// Anything able to hand the calculator a snapshot of projects.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects(&self) -> AppResult<Vec<Project>>;
}

/// Reads a JSON array of projects from disk.
#[derive(Debug, Clone)]
pub struct StaticProjectSource {
    path: PathBuf,
}

impl StaticProjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProjectSource for StaticProjectSource {
    async fn fetch_projects(&self) -> AppResult<Vec<Project>> {
        let raw = fs::read_to_string(&self.path)?;
        let projects: Vec<Project> = serde_json::from_str(&raw)?;
        info!(
            target: "app::monday",
            path = %self.path.display(),
            count = projects.len(),
            "loaded projects from file"
        );
        Ok(projects)
    }
}

/// GraphQL client for the project tracker board.
pub struct MondayClient {
    client: reqwest::Client,
    token: String,
    settings: BoardSettings,
    backoff_schedule: Vec<StdDuration>,
}

impl MondayClient {
    pub fn try_new(settings: BoardSettings, token: impl Into<String>) -> AppResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AppError::remote(
                RemoteErrorCode::MissingToken,
                "Monday.com API token is required",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(settings.http_timeout_secs))
            .pool_max_idle_per_host(2)
            .build()
            .map_err(|err| AppError::other(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            token,
            settings,
            backoff_schedule: vec![
                StdDuration::from_secs(0),
                StdDuration::from_secs(1),
                StdDuration::from_secs(2),
            ],
        })
    }

    /// Replaces the retry delays. The schedule length is the number of attempts.
    pub fn with_backoff(mut self, schedule: Vec<StdDuration>) -> Self {
        if !schedule.is_empty() {
            self.backoff_schedule = schedule;
        }
        self
    }

    async fn execute(&self, query: &str, variables: JsonValue) -> AppResult<JsonValue> {
        let correlation_id = Uuid::new_v4().to_string();
        let request_body = json!({ "query": query, "variables": variables });
        let mut last_error: Option<AppError> = None;

        for (attempt, delay) in self.backoff_schedule.iter().enumerate() {
            if *delay > StdDuration::from_secs(0) {
                sleep(*delay).await;
            }
            let last_attempt = attempt == self.backoff_schedule.len() - 1;

            debug!(
                target: "app::monday",
                attempt = attempt + 1,
                correlation_id = %correlation_id,
                board_id = self.settings.board_id,
                "querying Monday.com"
            );

            let start = Instant::now();
            let response = self
                .client
                .post(&self.settings.api_url)
                .header(AUTHORIZATION, &self.token)
                .json(&request_body)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let body: JsonValue = resp.json().await.map_err(|err| {
                            AppError::remote_with_details(
                                RemoteErrorCode::InvalidResponse,
                                "failed to decode Monday.com response",
                                Some(correlation_id.as_str()),
                                Some(json!({ "reason": err.to_string() })),
                            )
                        })?;
                        debug!(
                            target: "app::monday",
                            correlation_id = %correlation_id,
                            latency_ms = start.elapsed().as_millis() as u64,
                            "Monday.com responded"
                        );
                        return Self::extract_data(body, &correlation_id);
                    }

                    let body = resp.text().await.unwrap_or_default();
                    let (error, retryable) =
                        Self::map_http_error(status, &body, correlation_id.as_str());
                    warn!(
                        target: "app::monday",
                        correlation_id = %correlation_id,
                        status = status.as_u16(),
                        retryable,
                        "Monday.com returned an error status"
                    );
                    if !retryable || last_attempt {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(err) => {
                    let (error, retryable) = Self::error_from_reqwest(err, correlation_id.as_str());
                    warn!(
                        target: "app::monday",
                        correlation_id = %correlation_id,
                        retryable,
                        "Monday.com request failed"
                    );
                    if !retryable || last_attempt {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::remote_with_details(
                RemoteErrorCode::Unavailable,
                "Monday.com request failed",
                Some(correlation_id.as_str()),
                None,
            )
        }))
    }

    fn extract_data(body: JsonValue, correlation_id: &str) -> AppResult<JsonValue> {
        if let Some(errors) = body.get("errors").and_then(|value| value.as_array()) {
            let messages: Vec<String> = errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .and_then(|message| message.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string())
                })
                .collect();
            return Err(AppError::remote_with_details(
                RemoteErrorCode::ApiError,
                format!("Monday.com API errors: {}", messages.join(", ")),
                Some(correlation_id),
                Some(json!({ "errors": errors })),
            ));
        }

        Ok(body.get("data").cloned().unwrap_or_else(|| json!({})))
    }

    fn map_http_error(status: StatusCode, body: &str, correlation_id: &str) -> (AppError, bool) {
        let details = Some(json!({ "status": status.as_u16(), "body": body }));
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => (
                AppError::remote_with_details(
                    RemoteErrorCode::Unauthorized,
                    "Monday.com rejected the API token",
                    Some(correlation_id),
                    details,
                ),
                false,
            ),
            StatusCode::TOO_MANY_REQUESTS => (
                AppError::remote_with_details(
                    RemoteErrorCode::RateLimited,
                    "Monday.com rate limit reached",
                    Some(correlation_id),
                    details,
                ),
                true,
            ),
            status if status.is_server_error() => (
                AppError::remote_with_details(
                    RemoteErrorCode::Unavailable,
                    format!("HTTP {} error from Monday.com", status.as_u16()),
                    Some(correlation_id),
                    details,
                ),
                true,
            ),
            status => (
                AppError::remote_with_details(
                    RemoteErrorCode::Unknown,
                    format!("HTTP {} error from Monday.com", status.as_u16()),
                    Some(correlation_id),
                    details,
                ),
                false,
            ),
        }
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> (AppError, bool) {
        if err.is_timeout() {
            (
                AppError::remote_with_details(
                    RemoteErrorCode::HttpTimeout,
                    "Monday.com request timed out",
                    Some(correlation_id),
                    None,
                ),
                true,
            )
        } else if err.is_connect() {
            (
                AppError::remote_with_details(
                    RemoteErrorCode::Unavailable,
                    format!("network error connecting to Monday.com: {err}"),
                    Some(correlation_id),
                    None,
                ),
                true,
            )
        } else {
            (
                AppError::remote_with_details(
                    RemoteErrorCode::Unknown,
                    format!("Monday.com request failed: {err}"),
                    Some(correlation_id),
                    None,
                ),
                false,
            )
        }
    }
}

#[async_trait]
impl ProjectSource for MondayClient {
    async fn fetch_projects(&self) -> AppResult<Vec<Project>> {
        let variables = json!({
            "boardId": [self.settings.board_id.to_string()],
            "limit": self.settings.page_limit,
        });
        let data = self.execute(BOARD_ITEMS_QUERY, variables).await?;
        let projects = parse_board_items(&data, &self.settings);

        info!(
            target: "app::monday",
            board_id = self.settings.board_id,
            count = projects.len(),
            "fetched department projects"
        );
        Ok(projects)
    }
}

/// Turns the `data` object of a board query into projects of the configured department.
pub fn parse_board_items(data: &JsonValue, settings: &BoardSettings) -> Vec<Project> {
    let items = data
        .pointer("/boards/0/items_page/items")
        .and_then(|items| items.as_array());
    let Some(items) = items else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| belongs_to_department(item, settings))
        .map(|item| parse_project(item, &settings.columns))
        .collect()
}

fn belongs_to_department(item: &JsonValue, settings: &BoardSettings) -> bool {
    find_column(item, &settings.columns.department)
        .and_then(column_json)
        .and_then(|value| value.get("index").and_then(|index| index.as_i64()))
        .map(|index| index == settings.department_index)
        .unwrap_or(false)
}

fn parse_project(item: &JsonValue, columns: &BoardColumns) -> Project {
    let id = match item.get("id") {
        Some(JsonValue::String(id)) => id.clone(),
        Some(JsonValue::Number(id)) => id.to_string(),
        _ => String::new(),
    };
    let name = item
        .get("name")
        .and_then(|name| name.as_str())
        .unwrap_or(UNNAMED_PROJECT)
        .to_string();

    let status = find_column(item, &columns.status)
        .and_then(column_text)
        .unwrap_or(UNKNOWN_STATUS)
        .to_string();

    let assigned_people = find_column(item, &columns.people)
        .and_then(column_text)
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let filming_dates = columns
        .filming_dates
        .iter()
        .filter_map(|column_id| find_column(item, column_id).and_then(column_json))
        .filter_map(|value| parse_filming_date(&value, &name))
        .collect();

    let editing_ranges = columns
        .editing_ranges
        .iter()
        .filter_map(|column_id| find_column(item, column_id).and_then(column_json))
        .filter_map(|value| parse_editing_range(&value, &name))
        .collect();

    Project {
        id,
        name,
        status,
        assigned_people,
        filming_dates,
        editing_ranges,
    }
}

fn parse_filming_date(value: &JsonValue, project: &str) -> Option<FilmingDate> {
    let raw = value.get("date").and_then(|date| date.as_str())?;
    let date = parse_column_date(raw, project)?;
    let time_slot = value
        .get("time")
        .and_then(|time| time.as_str())
        .unwrap_or_default();
    Some(FilmingDate::with_slot(date, time_slot))
}

fn parse_editing_range(value: &JsonValue, project: &str) -> Option<EditingRange> {
    let from = value.get("from").and_then(|from| from.as_str())?;
    let to = value.get("to").and_then(|to| to.as_str())?;
    Some(EditingRange::new(
        parse_column_date(from, project)?,
        parse_column_date(to, project)?,
    ))
}

fn parse_column_date(raw: &str, project: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(
                target: "app::monday",
                %project,
                value = raw,
                error = %err,
                "skipping malformed date"
            );
            None
        }
    }
}

fn find_column<'a>(item: &'a JsonValue, column_id: &str) -> Option<&'a JsonValue> {
    item.get("column_values")?
        .as_array()?
        .iter()
        .find(|column| column.get("id").and_then(|id| id.as_str()) == Some(column_id))
}

fn column_text(column: &JsonValue) -> Option<&str> {
    column
        .get("text")
        .and_then(|text| text.as_str())
        .filter(|text| !text.trim().is_empty())
}

/// Column `value` fields arrive as JSON encoded inside a string.
fn column_json(column: &JsonValue) -> Option<JsonValue> {
    let raw = column.get("value")?.as_str()?;
    serde_json::from_str(raw).ok()
}
