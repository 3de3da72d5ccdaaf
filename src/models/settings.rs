use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FILMING_HOURS_PER_DAY: f64 = 4.0;
pub const DEFAULT_EDITING_HOURS_PER_DAY: f64 = 8.0;
pub const DEFAULT_MAX_HOURS_PER_DAY: f64 = 8.0;

pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";
pub const DEFAULT_BOARD_ID: u64 = 1215254769;
pub const DEFAULT_DEPARTMENT_INDEX: i64 = 17;
pub const DEFAULT_FORECAST_MONTHS: u32 = 3;
pub const MAX_FORECAST_MONTHS: u32 = 24;

/// Nominal hours per activity and the per-person daily cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HoursPolicy {
    pub filming_hours_per_day: f64,
    pub editing_hours_per_day: f64,
    pub max_hours_per_day: f64,
}

impl Default for HoursPolicy {
    fn default() -> Self {
        Self {
            filming_hours_per_day: DEFAULT_FILMING_HOURS_PER_DAY,
            editing_hours_per_day: DEFAULT_EDITING_HOURS_PER_DAY,
            max_hours_per_day: DEFAULT_MAX_HOURS_PER_DAY,
        }
    }
}

/// Column ids on the project tracker board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardColumns {
    pub status: String,
    pub people: String,
    pub department: String,
    pub filming_dates: Vec<String>,
    pub editing_ranges: Vec<String>,
}

impl Default for BoardColumns {
    fn default() -> Self {
        Self {
            status: "status2".to_string(),
            people: "people4".to_string(),
            department: "single_select5".to_string(),
            filming_dates: vec![
                "date5".to_string(),
                "date14".to_string(),
                "date46".to_string(),
                "date__1".to_string(),
            ],
            editing_ranges: vec![
                "date_range".to_string(),
                "date_range3".to_string(),
                "dup__of_editing_time_2__1".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardSettings {
    pub api_url: String,
    pub board_id: u64,
    pub department_index: i64,
    pub page_limit: u32,
    pub http_timeout_secs: u64,
    pub columns: BoardColumns,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            board_id: DEFAULT_BOARD_ID,
            department_index: DEFAULT_DEPARTMENT_INDEX,
            page_limit: 500,
            http_timeout_secs: 30,
            columns: BoardColumns::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub policy: HoursPolicy,
    pub board: BoardSettings,
    pub forecast_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            policy: HoursPolicy::default(),
            board: BoardSettings::default(),
            forecast_months: DEFAULT_FORECAST_MONTHS,
            log_dir: None,
        }
    }
}
