//! Voice input and read-aloud via the transcription and synthesis functions.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use models::chat::{FileData, speech_excerpt};

use crate::backend::{Backend, BackendError};

/// Voice requested from the synthesis function.
pub const SPEECH_VOICE: &str = "nova";

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("nothing to process")]
    EmptyInput,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscribePayload<'a> {
    audio: &'a str,
    mime_type: &'a str,
}

#[derive(Deserialize)]
struct TranscribeReply {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct SynthesizePayload<'a> {
    text: &'a str,
    voice: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    audio_data: Option<String>,
}

/// Transcribe a recorded clip. An unintelligible clip yields an empty string.
///
/// # Errors
///
/// Returns an error for an empty clip or a failed call.
pub async fn transcribe(
    backend: &dyn Backend,
    function: &str,
    token: Option<&str>,
    audio: &FileData,
) -> Result<String, SpeechError> {
    if audio.data.trim().is_empty() {
        return Err(SpeechError::EmptyInput);
    }
    info!(function, mime = %audio.mime_type, bytes_b64 = audio.data.len(), "transcription request");

    let payload = serde_json::to_value(TranscribePayload { audio: &audio.data, mime_type: &audio.mime_type })
        .map_err(|e| BackendError::Parse(e.to_string()))?;
    let value = backend.invoke(function, token, payload).await?;
    let reply: TranscribeReply = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok(reply.text.unwrap_or_default().trim().to_owned())
}

/// Synthesize the first characters of `text` as base64 WAV.
///
/// Returns `Ok(None)` when the function reports no audio.
///
/// # Errors
///
/// Returns an error for blank text or a failed call.
pub async fn synthesize(
    backend: &dyn Backend,
    function: &str,
    token: Option<&str>,
    text: &str,
) -> Result<Option<String>, SpeechError> {
    let excerpt = speech_excerpt(text.trim());
    if excerpt.is_empty() {
        return Err(SpeechError::EmptyInput);
    }

    let payload = serde_json::to_value(SynthesizePayload { text: excerpt, voice: SPEECH_VOICE })
        .map_err(|e| BackendError::Parse(e.to_string()))?;
    let value = backend.invoke(function, token, payload).await?;
    let reply: SynthesizeReply = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;

    match reply.audio_data.filter(|data| !data.is_empty()) {
        Some(data) if reply.success => Ok(Some(data)),
        _ => {
            warn!(function, "speech synthesis returned no audio");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "speech_test.rs"]
mod tests;
