//! Profile routes.

use axum::Json;
use axum::extract::State;

use models::api::UpdateProfileRequest;
use models::profile::UserProfile;

use super::auth::Authenticated;
use super::error::ApiError;
use crate::services::profile;
use crate::state::AppState;

/// Longest display name accepted.
pub const MAX_NAME_CHARS: usize = 120;

fn validate_name(name: &str) -> Result<&str, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("O nome não pode ficar vazio".into()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::BadRequest(format!("O nome pode ter no máximo {MAX_NAME_CHARS} caracteres")));
    }
    Ok(name)
}

/// `PATCH /api/profile`: change the display name (last write wins).
pub async fn update_profile(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let name = validate_name(&req.full_name)?;
    let profile = profile::update_name(state.backend.as_ref(), &auth.token, &auth.user, name).await?;
    Ok(Json(profile))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
