use super::*;
use crate::backend::config::{DEFAULT_FN_SPEECH, DEFAULT_FN_TRANSCRIBE};
use crate::state::test_helpers::MockBackend;
use models::chat::SPEECH_MAX_CHARS;
use serde_json::json;

fn clip() -> FileData {
    FileData { data: "GkXfo59ChoEBQveBAULygQRC".into(), mime_type: "audio/webm".into(), name: "voz.webm".into() }
}

// =========================================================================
// transcribe
// =========================================================================

#[tokio::test]
async fn transcribe_returns_trimmed_text() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_TRANSCRIBE, Ok(json!({ "text": " O que é usucapião? " })));

    let text = transcribe(&mock, DEFAULT_FN_TRANSCRIBE, None, &clip()).await.unwrap();
    assert_eq!(text, "O que é usucapião?");

    let invocations = mock.invocations.lock().unwrap();
    assert_eq!(invocations[0].1["mimeType"], "audio/webm");
    assert_eq!(invocations[0].1["audio"], "GkXfo59ChoEBQveBAULygQRC");
}

#[tokio::test]
async fn transcribe_without_text_is_empty() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_TRANSCRIBE, Ok(json!({})));
    assert_eq!(transcribe(&mock, DEFAULT_FN_TRANSCRIBE, None, &clip()).await.unwrap(), "");
}

#[tokio::test]
async fn transcribe_rejects_empty_clip() {
    let mock = MockBackend::default();
    let mut empty = clip();
    empty.data.clear();
    assert!(matches!(
        transcribe(&mock, DEFAULT_FN_TRANSCRIBE, None, &empty).await,
        Err(SpeechError::EmptyInput)
    ));
}

// =========================================================================
// synthesize
// =========================================================================

#[tokio::test]
async fn synthesize_truncates_and_requests_voice() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_SPEECH, Ok(json!({ "success": true, "audioData": "UklGRg==" })));

    let long = "a".repeat(SPEECH_MAX_CHARS * 2);
    let audio = synthesize(&mock, DEFAULT_FN_SPEECH, None, &long).await.unwrap();
    assert_eq!(audio.as_deref(), Some("UklGRg=="));

    let invocations = mock.invocations.lock().unwrap();
    assert_eq!(invocations[0].1["voice"], SPEECH_VOICE);
    assert_eq!(invocations[0].1["text"].as_str().unwrap().len(), SPEECH_MAX_CHARS);
}

#[tokio::test]
async fn synthesize_unsuccessful_reply_is_none() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_SPEECH, Ok(json!({ "success": false, "audioData": "UklGRg==" })));
    assert_eq!(synthesize(&mock, DEFAULT_FN_SPEECH, None, "Olá").await.unwrap(), None);
}

#[tokio::test]
async fn synthesize_rejects_blank_text() {
    let mock = MockBackend::default();
    assert!(matches!(synthesize(&mock, DEFAULT_FN_SPEECH, None, "  ").await, Err(SpeechError::EmptyInput)));
    assert!(mock.invocations.lock().unwrap().is_empty());
}
