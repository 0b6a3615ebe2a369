//! Tutor chat route.
//!
//! ERROR HANDLING
//! ==============
//! The chat overlay must always get a message back. Remote failures are
//! logged and answered with the fixed fallback reply (HTTP 200); only input
//! the client should never have sent is rejected with 400.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use models::api::{TutorRequest, TutorResponse};
use models::chat::FALLBACK_REPLY;

use super::auth::MaybeToken;
use super::error::ApiError;
use crate::services::tutor;
use crate::state::AppState;

/// `POST /api/tutor`
pub async fn ask(
    State(state): State<AppState>,
    MaybeToken(token): MaybeToken,
    Json(req): Json<TutorRequest>,
) -> Result<Json<TutorResponse>, ApiError> {
    match tutor::reply(state.backend.as_ref(), &state.functions.chat, token.as_deref(), &req).await {
        Ok(reply) => Ok(Json(TutorResponse { reply })),
        Err(e) if e.is_bad_request() => Err(ApiError::BadRequest(e.to_string())),
        Err(e) => {
            warn!(error = %e, "tutor reply failed; sending fallback");
            Ok(Json(TutorResponse { reply: FALLBACK_REPLY.to_owned() }))
        }
    }
}

#[cfg(test)]
#[path = "tutor_test.rs"]
mod tests;
