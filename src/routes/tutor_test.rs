use super::*;
use std::sync::Arc;

use axum::http::StatusCode;
use models::chat::TutorContext;
use serde_json::json;

use crate::backend::BackendError;
use crate::backend::config::DEFAULT_FN_CHAT;
use crate::state::test_helpers::{MockBackend, test_app_state};

fn question(text: &str) -> TutorRequest {
    TutorRequest { context: TutorContext::default(), question: text.into(), image_data: None, history: Vec::new() }
}

#[tokio::test]
async fn ask_returns_model_reply() {
    let mock = Arc::new(MockBackend::default());
    mock.queue(DEFAULT_FN_CHAT, Ok(json!({ "response": "Dolo é a vontade consciente..." })));

    let Json(resp) = ask(State(test_app_state(mock)), MaybeToken(None), Json(question("O que é dolo?")))
        .await
        .unwrap();
    assert_eq!(resp.reply, "Dolo é a vontade consciente...");
}

#[tokio::test]
async fn ask_sends_fallback_on_backend_failure() {
    let mock = Arc::new(MockBackend::default());
    mock.queue(DEFAULT_FN_CHAT, Err(BackendError::Status { status: 500, message: "boom".into() }));

    let Json(resp) = ask(State(test_app_state(mock)), MaybeToken(None), Json(question("O que é dolo?")))
        .await
        .unwrap();
    assert_eq!(resp.reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn ask_sends_fallback_when_function_is_missing() {
    let mock = Arc::new(MockBackend::default());
    let Json(resp) = ask(State(test_app_state(mock)), MaybeToken(None), Json(question("Oi")))
        .await
        .unwrap();
    assert_eq!(resp.reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn ask_rejects_blank_question() {
    let mock = Arc::new(MockBackend::default());
    let err = ask(State(test_app_state(mock)), MaybeToken(None), Json(question(" ")))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
