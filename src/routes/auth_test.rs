use super::*;
use std::sync::Arc;

use axum::http::{HeaderValue, Request};
use models::profile::ProfileType;

use crate::state::test_helpers::{MockBackend, PASSWORD, TOKEN, test_app_state};

fn parts_with(name: header::HeaderName, value: &str) -> Parts {
    Request::builder()
        .header(name, value)
        .body(())
        .unwrap()
        .into_parts()
        .0
}

fn sign_up_request(password: &str) -> SignUpRequest {
    SignUpRequest {
        email: "bia@x.test".into(),
        password: password.into(),
        full_name: " Beatriz Lima ".into(),
        profile_type: ProfileType::Concurso,
    }
}

// =============================================================================
// token_from_headers
// =============================================================================

#[test]
fn token_from_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session_token=abc"));
    assert_eq!(token_from_headers(&headers).as_deref(), Some("abc"));
}

#[test]
fn token_from_bearer_when_no_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer cli-token"));
    assert_eq!(token_from_headers(&headers).as_deref(), Some("cli-token"));
}

#[test]
fn cookie_wins_over_bearer() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("session_token=cookie"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer header"));
    assert_eq!(token_from_headers(&headers).as_deref(), Some("cookie"));
}

#[test]
fn empty_or_foreign_credentials_yield_none() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
    assert_eq!(token_from_headers(&headers), None);
}

// =============================================================================
// Authenticated extractor
// =============================================================================

#[tokio::test]
async fn authenticated_resolves_known_token() {
    let state = test_app_state(Arc::new(MockBackend::with_user()));
    let mut parts = parts_with(header::COOKIE, &format!("{COOKIE_NAME}={TOKEN}"));
    let auth = Authenticated::from_request_parts(&mut parts, &state).await.unwrap();
    assert_eq!(auth.user.id, "u-ana");
    assert_eq!(auth.token, TOKEN);
}

#[tokio::test]
async fn authenticated_rejects_missing_and_unknown_tokens() {
    let state = test_app_state(Arc::new(MockBackend::with_user()));

    let mut none = Request::builder().body(()).unwrap().into_parts().0;
    let err = Authenticated::from_request_parts(&mut none, &state).await.err().unwrap();
    assert!(matches!(err, ApiError::Unauthorized));

    let mut bogus = parts_with(header::AUTHORIZATION, "Bearer forged");
    let err = Authenticated::from_request_parts(&mut bogus, &state).await.err().unwrap();
    assert!(matches!(err, ApiError::Unauthorized));
}

// =============================================================================
// Handlers
// =============================================================================

#[tokio::test]
async fn sign_up_forwards_metadata_and_redirect() {
    let mock = Arc::new(MockBackend::default());
    let state = test_app_state(mock.clone());

    let Json(ok) = sign_up(State(state), Json(sign_up_request("segredo123"))).await.unwrap();
    assert!(ok.ok);

    let signups = mock.signups.lock().unwrap();
    let (email, metadata, redirect) = &signups[0];
    assert_eq!(email, "bia@x.test");
    assert_eq!(metadata.full_name.as_deref(), Some("Beatriz Lima"));
    assert_eq!(metadata.profile_type.as_deref(), Some("concurso"));
    assert_eq!(redirect.as_deref(), Some("https://lexdesk.example.test/"));
}

#[tokio::test]
async fn sign_up_surfaces_backend_validation_message() {
    let state = test_app_state(Arc::new(MockBackend::default()));
    let err = sign_up(State(state), Json(sign_up_request("123"))).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(err.to_string().contains("at least 6"));
}

#[tokio::test]
async fn sign_up_rejects_blank_name_locally() {
    let mock = Arc::new(MockBackend::default());
    let mut req = sign_up_request("segredo123");
    req.full_name = "  ".into();
    let err = sign_up(State(test_app_state(mock.clone())), Json(req)).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert!(mock.signups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn sign_in_sets_http_only_cookie_and_returns_profile() {
    let state = test_app_state(Arc::new(MockBackend::with_user()));
    let req = SignInRequest { email: "ana@x.test".into(), password: PASSWORD.into() };

    let (jar, Json(session)) = sign_in(State(state), CookieJar::new(), Json(req)).await.unwrap();
    let cookie = jar.get(COOKIE_NAME).unwrap();
    assert_eq!(cookie.value(), TOKEN);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(session.profile.full_name, "Ana Souza");
    assert_eq!(session.access_token.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn sign_in_with_wrong_password_is_400() {
    let state = test_app_state(Arc::new(MockBackend::with_user()));
    let req = SignInRequest { email: "ana@x.test".into(), password: "nope".into() };
    let err = sign_in(State(state), CookieJar::new(), Json(req)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[tokio::test]
async fn sign_out_notifies_backend_and_clears_cookie() {
    let mock = Arc::new(MockBackend::with_user());
    let state = test_app_state(mock.clone());

    let response = sign_out(State(state), MaybeToken(Some(TOKEN.into()))).await.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("session_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(mock.signed_out.lock().unwrap().as_slice(), [TOKEN.to_owned()]);
}

#[tokio::test]
async fn session_returns_user_and_profile_without_token() {
    let mock = Arc::new(MockBackend::with_user());
    let state = test_app_state(mock);
    let auth = Authenticated { user: crate::state::test_helpers::ana(), token: TOKEN.into() };

    let response = session(State(state), auth).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user"]["id"], "u-ana");
    assert_eq!(body["profile"]["profile_type"], "oab");
    assert!(body.get("access_token").is_none());
}
