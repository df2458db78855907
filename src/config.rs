use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::{API_ROOT_URL, REPORTS_ROOT_URL};
use crate::auth::Auth;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No Toggl credentials found. Set TOGGL_API_TOKEN or run `toggl login <token>`.")]
    MissingCredentials,
    #[error("Config directory not found")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings stored in `<config dir>/toggl-track/config.json`.
///
/// Environment variables take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_url: Option<String>,
}

impl Config {
    /// Reads `path` (or the default config file) and applies the process
    /// environment on top.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path.map(Path::to_path_buf).or_else(config_path) {
            Some(path) => read_config(&path)?,
            None => Config::default(),
        };
        Ok(file.with_env(|key| env::var(key).ok()))
    }

    /// Overlays non-empty values returned by `lookup` for the `TOGGL_*`
    /// variables.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(token) = var("TOGGL_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let (Some(username), Some(password)) = (var("TOGGL_USERNAME"), var("TOGGL_PASSWORD")) {
            self.username = Some(username);
            self.password = Some(password);
        }
        if let Some(url) = var("TOGGL_API_URL") {
            self.api_url = Some(url);
        }
        if let Some(url) = var("TOGGL_REPORTS_URL") {
            self.reports_url = Some(url);
        }
        self
    }

    /// A token wins over a username and password pair.
    pub fn auth(&self) -> Result<Auth, ConfigError> {
        if let Some(token) = &self.api_token {
            return Ok(Auth::token(token));
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Auth::basic(username, password)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(API_ROOT_URL)
    }

    pub fn reports_url(&self) -> &str {
        self.reports_url.as_deref().unwrap_or(REPORTS_ROOT_URL)
    }
}

pub fn config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("toggl-track");
    path.push("config.json");
    Some(path)
}

/// A missing file reads as an empty config.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_error)
}

/// Stores `token` in `path` (or the default config file), keeping other
/// settings.
pub fn write_token(path: Option<&Path>, token: &str) -> Result<PathBuf, ConfigError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(config_path)
        .ok_or(ConfigError::NoConfigDir)?;
    let mut config = read_config(&path)?;
    config.api_token = Some(token.trim().to_string());
    write_config(&path, &config)?;
    Ok(path)
}
