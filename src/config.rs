// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::client::http::parse_base;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.example", "Beneficios", "beneficios"));

pub const API_URL_ENV: &str = "BENEFICIOS_API_URL";

/// Base URL when nothing else is configured. Release builds target the
/// reverse proxy that serves the API under `/api/v1`.
pub const DEFAULT_API_URL: &str = if cfg!(debug_assertions) {
    "http://localhost:8080/api/v1"
} else {
    "http://localhost/api/v1"
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine platform-specific config dir")]
    NoConfigDir,
    #[error("Failed to access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Malformed config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid API URL '{0}': expected an absolute http(s) URL")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    CommandLine,
    Environment,
    ConfigFile,
    BuildDefault,
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrlSource::CommandLine => "--api-url",
            UrlSource::Environment => API_URL_ENV,
            UrlSource::ConfigFile => "config file",
            UrlSource::BuildDefault => "built-in default",
        };
        f.write_str(s)
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(ConfigError::NoConfigDir)?;
    Ok(proj.config_dir().join("config.json"))
}

/// Reads settings; a missing file means defaults.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings for commands that only read them. Without a config dir, or with
/// an unreadable file, the defaults apply and a warning is logged.
pub fn load_or_default(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        warn!("no config dir on this host; using default settings");
        return Settings::default();
    };
    load_from(path).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring saved settings");
        Settings::default()
    })
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(io_err)
}

/// Removes the settings file. Returns whether one existed.
pub fn reset(path: &Path) -> Result<bool, ConfigError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn validate_api_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim();
    parse_base(trimmed).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Picks the effective API URL: flag or environment first, then the
/// config file, then the build default.
pub fn resolve_api_url(
    explicit: Option<(&str, UrlSource)>,
    settings: &Settings,
) -> (String, UrlSource) {
    if let Some((url, source)) = explicit {
        return (url.trim().to_string(), source);
    }
    if let Some(url) = settings.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        return (url.trim().to_string(), UrlSource::ConfigFile);
    }
    (DEFAULT_API_URL.to_string(), UrlSource::BuildDefault)
}
