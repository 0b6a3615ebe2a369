//! Tutor service: study context + question → hosted chat function → reply text.
//!
//! DESIGN
//! ======
//! The hosted chat function takes a single message string, an optional
//! inline file and the recent conversation. This module builds that payload
//! from the tutor context: typed questions get the question prompt, attached
//! images get the image-explanation prompt with the image forwarded as base64.
//!
//! No retries. The route converts any error here into the fallback reply.

use serde::{Deserialize, Serialize};
use tracing::info;

use models::api::TutorRequest;
use models::chat::{FileData, HistoryTurn, build_image_prompt, build_question_prompt};

use crate::backend::{Backend, BackendError};

/// File name attached to forwarded screenshots.
pub const SCREENSHOT_NAME: &str = "screenshot.png";

#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("image is not a base64 data URL")]
    InvalidImage,
    #[error("chat function returned an empty reply")]
    EmptyReply,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TutorError {
    /// Whether the caller sent something unusable (as opposed to a remote failure).
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::EmptyQuestion | Self::InvalidImage)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatPayload<'a> {
    message: String,
    file_data: Option<FileData>,
    conversation_history: &'a [HistoryTurn],
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: Option<String>,
}

/// Build the chat function payload for a tutor request.
///
/// # Errors
///
/// Returns [`TutorError::EmptyQuestion`] for a blank question without an
/// image and [`TutorError::InvalidImage`] for a malformed image.
fn build_payload(request: &TutorRequest) -> Result<serde_json::Value, TutorError> {
    let (message, file_data) = match request.image_data.as_deref() {
        Some(url) => {
            let file = FileData::from_data_url(url, SCREENSHOT_NAME).ok_or(TutorError::InvalidImage)?;
            (build_image_prompt(&request.context), Some(file))
        }
        None => {
            let question = request.question.trim();
            if question.is_empty() {
                return Err(TutorError::EmptyQuestion);
            }
            (build_question_prompt(&request.context, question), None)
        }
    };
    let payload = ChatPayload { message, file_data, conversation_history: &request.history };
    serde_json::to_value(payload).map_err(|e| TutorError::Backend(BackendError::Parse(e.to_string())))
}

/// Ask the hosted chat function and return its reply text.
///
/// # Errors
///
/// Returns an error for unusable input, a failed call, or a reply without text.
pub async fn reply(
    backend: &dyn Backend,
    function: &str,
    token: Option<&str>,
    request: &TutorRequest,
) -> Result<String, TutorError> {
    let payload = build_payload(request)?;
    info!(function, with_image = request.image_data.is_some(), history = request.history.len(), "tutor request");

    let value = backend.invoke(function, token, payload).await?;
    let reply: ChatReply = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;
    reply
        .response
        .filter(|text| !text.trim().is_empty())
        .ok_or(TutorError::EmptyReply)
}

#[cfg(test)]
#[path = "tutor_test.rs"]
mod tests;
