//! Auth routes: sign-up, sign-in, sign-out, session lookup.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::{info, warn};

use models::api::{OkResponse, SessionResponse, SignInRequest, SignUpRequest};
use models::profile::{AuthUser, UserMetadata};

use super::error::ApiError;
use crate::services::profile;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

/// Session cookie lifetime when the backend does not report one.
const DEFAULT_SESSION_SECS: i64 = 3600;

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Access token from the session cookie, or from `Authorization: Bearer` for
/// non-browser clients.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|t| !t.is_empty()) {
        return Some(token.to_owned());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// The caller's token if one was sent. Not validated here; the backend
/// enforces it on whatever call the handler makes.
pub struct MaybeToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(token_from_headers(&parts.headers)))
    }
}

/// Authenticated account, validated against the backend.
/// Use as a handler parameter to require authentication.
pub struct Authenticated {
    pub user: AuthUser,
    pub token: String,
}

impl<S> FromRequestParts<S> for Authenticated
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let app_state = AppState::from_ref(state);
        let user = app_state.backend.get_user(&token).await?;
        Ok(Self { user, token })
    }
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(token: String, secure: bool, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_secs))
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

fn validate_sign_up(req: &SignUpRequest) -> Result<(), ApiError> {
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::BadRequest("Informe um email válido".into()));
    }
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Informe uma senha".into()));
    }
    if req.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Informe seu nome completo".into()));
    }
    Ok(())
}

/// `POST /api/auth/signup`: register with name and profile type as metadata.
pub async fn sign_up(State(state): State<AppState>, Json(req): Json<SignUpRequest>) -> Result<Json<OkResponse>, ApiError> {
    validate_sign_up(&req)?;
    let metadata = UserMetadata {
        full_name: Some(req.full_name.trim().to_owned()),
        profile_type: Some(req.profile_type.as_str().to_owned()),
    };
    let redirect = state.site_url.as_deref().map(|url| format!("{url}/"));
    state
        .backend
        .sign_up(req.email.trim(), &req.password, &metadata, redirect.as_deref())
        .await
        .inspect_err(|e| warn!(error = %e, "sign-up failed"))?;
    info!(profile_type = req.profile_type.as_str(), "account registered");
    Ok(Json(OkResponse { ok: true }))
}

/// `POST /api/auth/signin`: password sign-in; sets the session cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignInRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Informe email e senha".into()));
    }
    let session = state
        .backend
        .sign_in(req.email.trim(), &req.password)
        .await
        .inspect_err(|e| warn!(error = %e, "sign-in failed"))?;

    let profile = profile::resolve(state.backend.as_ref(), &session.access_token, &session.user).await;
    let max_age = session.expires_in.unwrap_or(DEFAULT_SESSION_SECS);
    let jar = jar.add(session_cookie(session.access_token.clone(), state.cookie_secure, max_age));
    info!(user_id = %session.user.id, "signed in");

    Ok((jar, Json(SessionResponse { user: session.user, profile, access_token: Some(session.access_token) })))
}

/// `POST /api/auth/signout`: best-effort backend sign-out; always clears the cookie.
pub async fn sign_out(State(state): State<AppState>, MaybeToken(token): MaybeToken) -> impl IntoResponse {
    if let Some(token) = token {
        if let Err(e) = state.backend.sign_out(&token).await {
            warn!(error = %e, "backend sign-out failed; clearing cookie anyway");
        }
    }
    let jar = CookieJar::new().add(cleared_cookie(state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/session`: current account and resolved profile.
pub async fn session(State(state): State<AppState>, auth: Authenticated) -> Response {
    let profile = profile::resolve(state.backend.as_ref(), &auth.token, &auth.user).await;
    Json(SessionResponse { user: auth.user, profile, access_token: None }).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
