use std::fmt;

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCode {
    MissingToken,
    Unauthorized,
    HttpTimeout,
    RateLimited,
    InvalidResponse,
    ApiError,
    Unavailable,
    Unknown,
}

impl RemoteErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteErrorCode::MissingToken => "MISSING_TOKEN",
            RemoteErrorCode::Unauthorized => "UNAUTHORIZED",
            RemoteErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            RemoteErrorCode::RateLimited => "RATE_LIMITED",
            RemoteErrorCode::InvalidResponse => "INVALID_RESPONSE",
            RemoteErrorCode::ApiError => "API_ERROR",
            RemoteErrorCode::Unavailable => "UNAVAILABLE",
            RemoteErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RemoteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Remote {
        code: RemoteErrorCode,
        message: String,
        correlation_id: Option<String>,
        details: Option<JsonValue>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        let what = what.into();
        warn!(target: "app::lookup", %what, "record not found");
        AppError::NotFound(what)
    }

    pub fn remote(code: RemoteErrorCode, message: impl Into<String>) -> Self {
        Self::remote_with_details(code, message, None, None)
    }

    pub fn remote_with_details(
        code: RemoteErrorCode,
        message: impl Into<String>,
        correlation_id: Option<&str>,
        details: Option<JsonValue>,
    ) -> Self {
        let message = message.into();
        let correlation = correlation_id.map(|value| value.to_string());
        match (&correlation, &details) {
            (Some(id), Some(payload)) => {
                warn!(
                    target: "app::remote",
                    code = %code,
                    correlation_id = %id,
                    details = %payload,
                    %message
                );
            }
            (Some(id), None) => {
                warn!(target: "app::remote", code = %code, correlation_id = %id, %message);
            }
            (None, Some(payload)) => {
                warn!(target: "app::remote", code = %code, details = %payload, %message);
            }
            (None, None) => {
                warn!(target: "app::remote", code = %code, %message);
            }
        }

        AppError::Remote {
            code,
            message,
            correlation_id: correlation,
            details,
        }
    }

    pub fn remote_code(&self) -> Option<RemoteErrorCode> {
        match self {
            AppError::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn remote_details(&self) -> Option<&JsonValue> {
        match self {
            AppError::Remote { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::settings", %message, "configuration error");
        AppError::Config(message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(error: serde_yaml::Error) -> Self {
        AppError::config(format!("invalid settings file: {error}"))
    }
}
