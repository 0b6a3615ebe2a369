//! Mind-map generation from an uploaded document.
//!
//! The document goes to the hosted generation function together with the
//! fixed JSON-shape instruction; the free-text reply is parsed leniently
//! by [`models::mind_map::parse_generated`], which falls back to a one-node
//! summary instead of failing. Only transport-level failures are errors.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::chat::FileData;
use models::mind_map::{GENERATION_PROMPT, MindMap, parse_generated};

use crate::backend::{Backend, BackendError};

#[derive(Debug, thiserror::Error)]
pub enum MindMapServiceError {
    #[error("uploaded file is empty")]
    EmptyFile,
    #[error("generation function returned no text")]
    EmptyReply,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePayload<'a> {
    message: &'static str,
    file_data: &'a FileData,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: Option<String>,
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    i64::try_from(time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or_default()
}

/// Generate a map from `file` via the hosted function `function`.
///
/// # Errors
///
/// Returns an error when the file is empty, the call fails, or the reply has no text.
pub async fn generate(
    backend: &dyn Backend,
    function: &str,
    token: Option<&str>,
    file: &FileData,
) -> Result<MindMap, MindMapServiceError> {
    if file.data.trim().is_empty() {
        return Err(MindMapServiceError::EmptyFile);
    }
    info!(function, file = %file.name, mime = %file.mime_type, "mind map generation request");

    let payload = serde_json::to_value(GeneratePayload { message: GENERATION_PROMPT, file_data: file })
        .map_err(|e| BackendError::Parse(e.to_string()))?;
    let value = backend.invoke(function, token, payload).await?;
    let reply: GenerateReply = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;
    let text = reply
        .response
        .filter(|text| !text.trim().is_empty())
        .ok_or(MindMapServiceError::EmptyReply)?;

    Ok(parse_generated(&text, &file.name, Uuid::new_v4().to_string(), now_ms()))
}

#[cfg(test)]
#[path = "mind_map_test.rs"]
mod tests;
