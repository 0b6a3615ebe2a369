//! Managed-backend configuration: endpoint, key, timeouts, table and function names.

use crate::config::{ConfigError, env_non_empty, env_or, env_parse_u64};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_BOOKS_TABLE: &str = "biblioteca_juridica";
pub const DEFAULT_PROFILES_TABLE: &str = "perfis";
pub const DEFAULT_SETTINGS_TABLE: &str = "user_settings";

pub const DEFAULT_FN_CHAT: &str = "gemini-ai-chat";
pub const DEFAULT_FN_MIND_MAP: &str = "openai-legal-chat";
pub const DEFAULT_FN_TRANSCRIBE: &str = "voice-to-text";
pub const DEFAULT_FN_SPEECH: &str = "gemini-tts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub books: String,
    pub profiles: String,
    pub settings: String,
}

/// Names of the hosted functions invoked by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNames {
    pub chat: String,
    pub mind_map: String,
    pub transcribe: String,
    pub speech: String,
}

impl Default for FunctionNames {
    fn default() -> Self {
        Self {
            chat: DEFAULT_FN_CHAT.to_owned(),
            mind_map: DEFAULT_FN_MIND_MAP.to_owned(),
            transcribe: DEFAULT_FN_TRANSCRIBE.to_owned(),
            speech: DEFAULT_FN_SPEECH.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without trailing slash, e.g. `https://project.example.co`.
    pub base_url: String,
    /// Public (anon) API key sent on every request.
    pub anon_key: String,
    pub timeouts: BackendTimeouts,
    pub tables: TableNames,
    pub functions: FunctionNames,
}

impl BackendConfig {
    /// Build typed backend config from environment variables.
    ///
    /// Required:
    /// - `BACKEND_URL`
    /// - `BACKEND_ANON_KEY`
    ///
    /// Optional:
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 120
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    /// - `BOOKS_TABLE`, `PROFILES_TABLE`, `SETTINGS_TABLE`
    /// - `FN_CHAT`, `FN_MIND_MAP`, `FN_TRANSCRIBE`, `FN_SPEECH`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable is absent and
    /// [`ConfigError::Invalid`] when `BACKEND_URL` is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_non_empty("BACKEND_URL").ok_or(ConfigError::Missing("BACKEND_URL"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: "BACKEND_URL", value: base_url });
        }
        let anon_key = env_non_empty("BACKEND_ANON_KEY").ok_or(ConfigError::Missing("BACKEND_ANON_KEY"))?;

        let timeouts = BackendTimeouts {
            request_secs: env_parse_u64("BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let tables = TableNames {
            books: env_or("BOOKS_TABLE", DEFAULT_BOOKS_TABLE),
            profiles: env_or("PROFILES_TABLE", DEFAULT_PROFILES_TABLE),
            settings: env_or("SETTINGS_TABLE", DEFAULT_SETTINGS_TABLE),
        };
        let functions = FunctionNames {
            chat: env_or("FN_CHAT", DEFAULT_FN_CHAT),
            mind_map: env_or("FN_MIND_MAP", DEFAULT_FN_MIND_MAP),
            transcribe: env_or("FN_TRANSCRIBE", DEFAULT_FN_TRANSCRIBE),
            speech: env_or("FN_SPEECH", DEFAULT_FN_SPEECH),
        };

        Ok(Self { base_url: base_url.trim_end_matches('/').to_owned(), anon_key, timeouts, tables, functions })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
