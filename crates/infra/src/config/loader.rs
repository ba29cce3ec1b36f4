//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `POSITIVEVOICE_REGION`: identity provider region
//! - `POSITIVEVOICE_USER_POOL_ID`: user pool id
//! - `POSITIVEVOICE_CLIENT_ID`: user pool app client id
//! - `POSITIVEVOICE_API_ENDPOINT`: REST backend base URL
//! - `POSITIVEVOICE_MEDIA_BUCKET`: bucket name used for image uploads
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `positivevoice.{json,toml}` in
//! the working directory, its two parents, and next to the executable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use positivevoice_domain::{Result, VoiceError};

/// Client configuration surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
    pub api_endpoint: String,
    pub media_bucket: String,
}

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `VoiceError::Config` if neither source yields a complete
/// configuration.
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `VoiceError::Config` if any required variable is missing.
pub fn load_from_env() -> Result<AppConfig> {
    Ok(AppConfig {
        region: env_var("POSITIVEVOICE_REGION")?,
        user_pool_id: env_var("POSITIVEVOICE_USER_POOL_ID")?,
        client_id: env_var("POSITIVEVOICE_CLIENT_ID")?,
        api_endpoint: env_var("POSITIVEVOICE_API_ENDPOINT")?,
        media_bucket: env_var("POSITIVEVOICE_MEDIA_BUCKET")?,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected by
/// extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `VoiceError::Config` when no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VoiceError::Config(format!("config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VoiceError::Config("no config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VoiceError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VoiceError::Config(format!("invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VoiceError::Config(format!("invalid JSON format: {e}"))),
        _ => Err(VoiceError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for base in [&cwd, &cwd.join(".."), &cwd.join("../..")] {
            candidates.extend(file_names().iter().map(|name| base.join(name)));
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(file_names().iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn file_names() -> [&'static str; 4] {
    ["config.json", "config.toml", "positivevoice.json", "positivevoice.toml"]
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| VoiceError::Config(format!("missing required environment variable: {key}")))
}
