use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, AppResult, RemoteErrorCode};
use crate::utils::redact::mask_secret;

pub const CONFIG_FILE_NAME: &str = ".vans_reporter_config";
pub const TOKEN_ENV_VAR: &str = "MONDAY_API_TOKEN";

#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monday_api_token: Option<String>,
}

/// Stores the Monday.com API token in a small JSON file readable only by its owner.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.vans_reporter_config`.
    pub fn default_location() -> AppResult<Self> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .ok_or_else(|| AppError::config("cannot locate the home directory"))?;
        Ok(Self::new(Path::new(&home).join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token. Missing, unreadable and malformed files all yield `None`.
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }

        let parsed = fs::read_to_string(&self.path)
            .map_err(AppError::from)
            .and_then(|raw| serde_json::from_str::<TokenFile>(&raw).map_err(AppError::from));

        match parsed {
            Ok(file) => file
                .monday_api_token
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
            Err(err) => {
                warn!(
                    target: "app::token",
                    path = %self.path.display(),
                    error = %err,
                    "could not load token from config file"
                );
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> AppResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::validation("API token cannot be empty"));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let body = serde_json::to_string_pretty(&TokenFile {
            monday_api_token: Some(token.to_string()),
        })?;
        // Permissions are tightened before the secret is written, also for pre-existing files.
        let mut file = open_owner_only(&self.path)?;
        restrict_permissions(&file)?;
        file.write_all(body.as_bytes())?;
        file.sync_all()?;

        info!(
            target: "app::token",
            path = %self.path.display(),
            token = %mask_secret(token),
            "token saved"
        );
        Ok(())
    }

    /// Deletes the stored token. Returns whether a file was removed.
    pub fn reset(&self) -> AppResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        info!(target: "app::token", path = %self.path.display(), "token removed");
        Ok(true)
    }

    /// Stored token first, then `MONDAY_API_TOKEN`, then `prompt`. A prompted token is saved.
    pub fn resolve<F>(&self, prompt: F) -> AppResult<String>
    where
        F: FnOnce() -> AppResult<Option<String>>,
    {
        if let Some(token) = self.load() {
            return Ok(token);
        }

        if let Some(token) = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            info!(target: "app::token", "using token from {TOKEN_ENV_VAR}");
            return Ok(token);
        }

        match prompt()?.map(|value| value.trim().to_string()) {
            Some(token) if !token.is_empty() => {
                self.save(&token)?;
                Ok(token)
            }
            _ => Err(AppError::remote(
                RemoteErrorCode::MissingToken,
                "a Monday.com API token is required (Profile > Developers > My Access Tokens)",
            )),
        }
    }
}

fn open_owner_only(path: &Path) -> AppResult<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    Ok(options.open(path)?)
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> AppResult<()> {
    Ok(())
}
