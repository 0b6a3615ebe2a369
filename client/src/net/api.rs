//! REST API helpers for communicating with the gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth, catalog
//! and AI failures degrade UI behavior without crashing hydration. Error
//! strings prefer the gateway's `{ "error": ... }` message when present.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use models::api::{SessionResponse, SignUpRequest, TutorRequest};
use models::book::Book;
use models::chat::FileData;
use models::mind_map::MindMap;

#[cfg(any(test, feature = "hydrate"))]
const SESSION_PATH: &str = "/api/auth/session";
#[cfg(any(test, feature = "hydrate"))]
const SIGNIN_PATH: &str = "/api/auth/signin";
#[cfg(any(test, feature = "hydrate"))]
const SIGNUP_PATH: &str = "/api/auth/signup";
#[cfg(any(test, feature = "hydrate"))]
const SIGNOUT_PATH: &str = "/api/auth/signout";
#[cfg(any(test, feature = "hydrate"))]
const PROFILE_PATH: &str = "/api/profile";
#[cfg(any(test, feature = "hydrate"))]
const BOOKS_PATH: &str = "/api/books";
#[cfg(any(test, feature = "hydrate"))]
const TUTOR_PATH: &str = "/api/tutor";
#[cfg(any(test, feature = "hydrate"))]
const MIND_MAP_PATH: &str = "/api/mind-maps/generate";
#[cfg(any(test, feature = "hydrate"))]
const TRANSCRIBE_PATH: &str = "/api/speech/transcribe";
#[cfg(any(test, feature = "hydrate"))]
const SPEECH_PATH: &str = "/api/speech/synthesize";

#[cfg(not(feature = "hydrate"))]
const UNAVAILABLE: &str = "not available on server";

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(path: &str, status: u16) -> String {
    format!("{path} failed: {status}")
}

/// Pick the gateway's error text out of a failed response body.
#[cfg(any(test, feature = "hydrate"))]
fn failure_message(path: &str, status: u16, body: &str) -> String {
    serde_json::from_str::<models::api::ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| request_failed_message(path, status))
}

#[cfg(feature = "hydrate")]
async fn read_failure(path: &str, resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    failure_message(path, status, &body)
}

#[cfg(feature = "hydrate")]
async fn post_json<B, T>(path: &str, body: &B) -> Result<T, String>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(path)
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(read_failure(path, resp).await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

/// Fetch the current session from `/api/auth/session`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_session() -> Option<SessionResponse> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(SESSION_PATH).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<SessionResponse>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in with email and password. The gateway sets the session cookie.
///
/// # Errors
///
/// Returns the gateway's message when the credentials are rejected.
pub async fn sign_in(email: &str, password: &str) -> Result<SessionResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = models::api::SignInRequest { email: email.to_owned(), password: password.to_owned() };
        post_json(SIGNIN_PATH, &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(UNAVAILABLE.to_owned())
    }
}

/// Register a new account. Confirmation happens by email.
///
/// # Errors
///
/// Returns the gateway's message when sign-up is refused.
pub async fn sign_up(request: &SignUpRequest) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let _: models::api::OkResponse = post_json(SIGNUP_PATH, request).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Log out the current user by calling `POST /api/auth/signout`.
pub async fn sign_out() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post(SIGNOUT_PATH).send().await;
    }
}

/// Rename the signed-in user's profile.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn update_profile(full_name: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = models::api::UpdateProfileRequest { full_name: full_name.to_owned() };
        let resp = gloo_net::http::Request::patch(PROFILE_PATH)
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure(PROFILE_PATH, resp).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = full_name;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Fetch the whole catalog from `/api/books`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_books() -> Result<Vec<Book>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(BOOKS_PATH)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure(BOOKS_PATH, resp).await);
        }
        resp.json::<Vec<Book>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(UNAVAILABLE.to_owned())
    }
}

/// Ask the tutor and return its reply.
///
/// # Errors
///
/// Returns an error string if the request fails; callers show the fallback reply.
pub async fn ask_tutor(request: &TutorRequest) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp: models::api::TutorResponse = post_json(TUTOR_PATH, request).await?;
        Ok(resp.reply)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Upload a document and receive a generated mind map.
///
/// # Errors
///
/// Returns an error string if generation fails.
pub async fn generate_mind_map(file: FileData) -> Result<MindMap, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp: models::api::MindMapResponse = post_json(MIND_MAP_PATH, &models::api::MindMapRequest { file }).await?;
        Ok(resp.map)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = file;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Transcribe a voice recording.
///
/// # Errors
///
/// Returns an error string if transcription fails.
pub async fn transcribe(audio: FileData) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp: models::api::TranscribeResponse =
            post_json(TRANSCRIBE_PATH, &models::api::TranscribeRequest { audio }).await?;
        Ok(resp.text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = audio;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Synthesize speech for `text`. `Ok(None)` means the service produced no audio.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn synthesize(text: &str) -> Result<Option<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp: models::api::SpeechResponse =
            post_json(SPEECH_PATH, &models::api::SpeechRequest { text: text.to_owned() }).await?;
        Ok(resp.audio_data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
        Err(UNAVAILABLE.to_owned())
    }
}
