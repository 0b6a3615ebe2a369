//! Backend error type and wire helpers shared by the HTTP client and its callers.

/// Errors from calls to the managed backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized.
    #[error("backend response parse failed: {0}")]
    Parse(String),

    /// A hosted function answered 2xx but reported an error in its body.
    #[error("backend rejected request: {message}")]
    Rejected { message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl BackendError {
    /// Whether the backend refused the caller's credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Whether the backend refused the request itself (bad input, bad credentials).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status: 400..=499, .. } | Self::Rejected { .. })
    }

    /// Message suitable for showing to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Rejected { message } => message.clone(),
            _ => "Serviço temporariamente indisponível".to_owned(),
        }
    }
}

/// Longest raw body echoed into an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Pull a human-readable message out of an error response body.
///
/// Auth endpoints use `msg` / `error_description`, the query interface uses
/// `message`, and hosted functions use `error`. Anything else is echoed raw.
#[must_use]
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                if !text.trim().is_empty() {
                    return text.trim().to_owned();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_owned();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Check a hosted-function reply for an in-body `error` field.
///
/// # Errors
///
/// Returns [`BackendError::Rejected`] when the reply carries a non-empty `error` string.
pub fn check_function_reply(value: serde_json::Value) -> Result<serde_json::Value, BackendError> {
    match value.get("error").and_then(serde_json::Value::as_str) {
        Some(message) if !message.trim().is_empty() => Err(BackendError::Rejected { message: message.to_owned() }),
        _ => Ok(value),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
