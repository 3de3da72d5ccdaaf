use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::settings::{AppSettings, HoursPolicy, MAX_FORECAST_MONTHS};

pub const API_URL_ENV_VAR: &str = "VANS_REPORTER_API_URL";

pub struct SettingsService;

impl SettingsService {
    /// Loads settings from a YAML file when given, otherwise starts from defaults.
    /// `VANS_REPORTER_API_URL` overrides the API URL in both cases.
    pub fn load(path: Option<&Path>) -> AppResult<AppSettings> {
        let mut settings = match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|err| {
                    AppError::config(format!("cannot read {}: {err}", path.display()))
                })?;
                let parsed = Self::parse(&raw)?;
                info!(target: "app::settings", path = %path.display(), "settings loaded");
                parsed
            }
            None => {
                debug!(target: "app::settings", "using default settings");
                AppSettings::default()
            }
        };

        if let Some(url) = std::env::var(API_URL_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            debug!(target: "app::settings", %url, "api url overridden from environment");
            settings.board.api_url = url;
        }

        Self::validate(&settings)?;
        Ok(settings)
    }

    pub fn parse(raw: &str) -> AppResult<AppSettings> {
        if raw.trim().is_empty() {
            return Ok(AppSettings::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(settings: &AppSettings) -> AppResult<()> {
        ensure_valid_policy(&settings.policy)?;

        if settings.board.page_limit == 0 {
            return Err(AppError::validation("page limit must be at least 1"));
        }
        ensure_forecast_months(settings.forecast_months)?;
        if settings.board.api_url.trim().is_empty() {
            return Err(AppError::validation("api url cannot be empty"));
        }
        Ok(())
    }
}

pub fn ensure_forecast_months(months: u32) -> AppResult<()> {
    if months > MAX_FORECAST_MONTHS {
        return Err(AppError::validation_with_details(
            format!("forecast months cannot exceed {MAX_FORECAST_MONTHS}"),
            json!({ "forecastMonths": months }),
        ));
    }
    Ok(())
}

pub fn ensure_valid_policy(policy: &HoursPolicy) -> AppResult<()> {
    let fields = [
        ("filmingHoursPerDay", policy.filming_hours_per_day),
        ("editingHoursPerDay", policy.editing_hours_per_day),
        ("maxHoursPerDay", policy.max_hours_per_day),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::validation_with_details(
                "hours policy values must be positive",
                json!({ "field": name, "value": value }),
            ));
        }
    }
    Ok(())
}
