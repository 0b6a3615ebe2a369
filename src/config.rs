//! Process configuration parsed from environment variables.
//!
//! `.env` is loaded by `main` before anything here runs, so every value can
//! come from either the real environment or the dotenv file.

use crate::backend::config::BackendConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "lexdesk=info,tower_http=info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Public URL of this site; sign-up confirmation emails redirect here.
    pub site_url: Option<String>,
    pub cookie_secure: bool,
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITE_URL`: no default
    /// - `COOKIE_SECURE`: defaults to whether `SITE_URL` is `https://`
    ///
    /// Backend variables are documented on [`BackendConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is malformed or the backend config is incomplete.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            Err(_) => DEFAULT_PORT,
        };
        let site_url = env_non_empty("SITE_URL").map(|url| url.trim_end_matches('/').to_owned());
        let cookie_secure = env_bool("COOKIE_SECURE")
            .unwrap_or_else(|| site_url.as_deref().is_some_and(|url| url.starts_with("https://")));
        let backend = BackendConfig::from_env()?;

        Ok(Self { port, site_url, cookie_secure, backend })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_owned())
}

/// Serializes tests that mutate process-wide environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
#[path = "config_test.rs"]
pub(crate) mod tests;
