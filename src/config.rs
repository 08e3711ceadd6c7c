//! Application configuration module
//!
//! Settings come from the environment (after loading `.env`, if present).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ADMIN_BACKEND_URL` | `http://localhost:8080` |
//! | `ADMIN_API_PATH` | `/api` |
//! | `ADMIN_REQUEST_TIMEOUT_SECS` | `30` |
//! | `ADMIN_SEARCH_DEBOUNCE_MS` | `300` |
//! | `ADMIN_STATE_FILE` | `admin-console-state.json` |

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Complete application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root of the REST backend; resource endpoints hang directly off it.
    pub backend_url: Url,
    /// Prefix of the dashboard endpoints, relative to `backend_url`.
    pub api_path: String,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    /// Where sidebar/theme flags and the session survive restarts.
    pub state_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid"),
            api_path: "/api".to_string(),
            request_timeout: Duration::from_secs(30),
            search_debounce: Duration::from_millis(300),
            state_file: PathBuf::from("admin-console-state.json"),
        }
    }
}

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend_url = match lookup("ADMIN_BACKEND_URL") {
            Some(raw) => parse_backend_url(&raw)?,
            None => defaults.backend_url,
        };

        let api_path = lookup("ADMIN_API_PATH")
            .map(|raw| normalize_api_path(&raw))
            .unwrap_or(defaults.api_path);

        let request_timeout = match lookup("ADMIN_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("ADMIN_REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };

        let search_debounce = match lookup("ADMIN_SEARCH_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(parse_number("ADMIN_SEARCH_DEBOUNCE_MS", &raw)?),
            None => defaults.search_debounce,
        };

        let state_file = lookup("ADMIN_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file);

        Ok(Self {
            backend_url,
            api_path,
            request_timeout,
            search_debounce,
            state_file,
        })
    }
}

fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key: "ADMIN_BACKEND_URL",
        reason: format!("{raw:?}: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            key: "ADMIN_BACKEND_URL",
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// `api`, `/api/` and `/api` all mean `/api`; an empty value means no prefix.
fn normalize_api_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        reason: format!("expected a whole number, got {raw:?}"),
    })
}
