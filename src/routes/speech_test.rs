use super::*;
use std::sync::Arc;

use axum::http::StatusCode;
use models::chat::FileData;
use serde_json::json;

use crate::backend::config::{DEFAULT_FN_SPEECH, DEFAULT_FN_TRANSCRIBE};
use crate::state::test_helpers::{MockBackend, test_app_state};

#[tokio::test]
async fn transcribe_returns_text() {
    let mock = Arc::new(MockBackend::default());
    mock.queue(DEFAULT_FN_TRANSCRIBE, Ok(json!({ "text": "prescrição" })));
    let req = TranscribeRequest {
        audio: FileData { data: "AAAA".into(), mime_type: "audio/webm".into(), name: "voz.webm".into() },
    };

    let Json(resp) = transcribe(State(test_app_state(mock)), MaybeToken(None), Json(req)).await.unwrap();
    assert_eq!(resp.text, "prescrição");
}

#[tokio::test]
async fn synthesize_returns_audio_or_none() {
    let mock = Arc::new(MockBackend::default());
    mock.queue(DEFAULT_FN_SPEECH, Ok(json!({ "success": true, "audioData": "UklGRg==" })));
    mock.queue(DEFAULT_FN_SPEECH, Ok(json!({ "success": false })));
    let state = test_app_state(mock);

    let Json(first) = synthesize(State(state.clone()), MaybeToken(None), Json(SpeechRequest { text: "Olá".into() }))
        .await
        .unwrap();
    assert_eq!(first.audio_data.as_deref(), Some("UklGRg=="));

    let Json(second) = synthesize(State(state), MaybeToken(None), Json(SpeechRequest { text: "Olá".into() }))
        .await
        .unwrap();
    assert_eq!(second.audio_data, None);
}

#[tokio::test]
async fn synthesize_blank_text_is_400_and_outage_is_502() {
    let mock = Arc::new(MockBackend::default());
    let state = test_app_state(mock);

    let err = synthesize(State(state.clone()), MaybeToken(None), Json(SpeechRequest { text: " ".into() }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = synthesize(State(state), MaybeToken(None), Json(SpeechRequest { text: "Olá".into() }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}
