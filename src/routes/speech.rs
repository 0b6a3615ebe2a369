//! Voice input and read-aloud routes.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use models::api::{SpeechRequest, SpeechResponse, TranscribeRequest, TranscribeResponse};

use super::auth::MaybeToken;
use super::error::ApiError;
use crate::services::speech::{self, SpeechError};
use crate::state::AppState;

fn to_api_error(err: SpeechError, what: &str) -> ApiError {
    match err {
        SpeechError::EmptyInput => ApiError::BadRequest(format!("Nada para {what}")),
        SpeechError::Backend(e) => {
            warn!(error = %e, "{what} failed");
            ApiError::Upstream(format!("Erro ao {what}"))
        }
    }
}

/// `POST /api/speech/transcribe`
pub async fn transcribe(
    State(state): State<AppState>,
    MaybeToken(token): MaybeToken,
    Json(req): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let text = speech::transcribe(state.backend.as_ref(), &state.functions.transcribe, token.as_deref(), &req.audio)
        .await
        .map_err(|e| to_api_error(e, "transcrever"))?;
    Ok(Json(TranscribeResponse { text }))
}

/// `POST /api/speech/synthesize`
pub async fn synthesize(
    State(state): State<AppState>,
    MaybeToken(token): MaybeToken,
    Json(req): Json<SpeechRequest>,
) -> Result<Json<SpeechResponse>, ApiError> {
    let audio_data = speech::synthesize(state.backend.as_ref(), &state.functions.speech, token.as_deref(), &req.text)
        .await
        .map_err(|e| to_api_error(e, "sintetizar"))?;
    Ok(Json(SpeechResponse { audio_data }))
}

#[cfg(test)]
#[path = "speech_test.rs"]
mod tests;
