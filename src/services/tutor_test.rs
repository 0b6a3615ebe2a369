use super::*;
use crate::backend::config::DEFAULT_FN_CHAT;
use crate::state::test_helpers::MockBackend;
use models::chat::TutorContext;
use serde_json::json;

fn request(question: &str, image_data: Option<&str>) -> TutorRequest {
    TutorRequest {
        context: TutorContext::Book { title: "Curso de Direito Civil".into(), area: Some("Direito Civil".into()), author: None },
        question: question.into(),
        image_data: image_data.map(str::to_owned),
        history: vec![HistoryTurn { role: "model".into(), content: "Olá!".into() }],
    }
}

// =========================================================================
// build_payload
// =========================================================================

#[test]
fn question_payload_carries_prompt_and_history() {
    let payload = build_payload(&request("O que é posse?", None)).unwrap();
    let message = payload["message"].as_str().unwrap();
    assert!(message.starts_with("Contexto: O usuário está lendo o livro \"Curso de Direito Civil\""));
    assert!(message.ends_with("Pergunta do usuário: O que é posse?"));
    assert!(payload["fileData"].is_null());
    assert_eq!(payload["conversationHistory"][0]["role"], "model");
}

#[test]
fn image_payload_forwards_base64_without_prefix() {
    let payload = build_payload(&request("Pode explicar esta parte?", Some("data:image/png;base64,iVBOR"))).unwrap();
    assert!(payload["message"].as_str().unwrap().contains("analise a imagem anexada"));
    assert_eq!(payload["fileData"]["data"], "iVBOR");
    assert_eq!(payload["fileData"]["mimeType"], "image/png");
    assert_eq!(payload["fileData"]["name"], SCREENSHOT_NAME);
}

#[test]
fn blank_question_is_rejected() {
    assert!(matches!(build_payload(&request("   ", None)), Err(TutorError::EmptyQuestion)));
}

#[test]
fn malformed_image_is_rejected() {
    let err = build_payload(&request("x", Some("https://example.test/a.png"))).unwrap_err();
    assert!(matches!(err, TutorError::InvalidImage));
    assert!(err.is_bad_request());
}

// =========================================================================
// reply
// =========================================================================

#[tokio::test]
async fn reply_returns_response_text() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_CHAT, Ok(json!({ "response": "Posse é o exercício de fato..." })));

    let text = reply(&mock, DEFAULT_FN_CHAT, None, &request("O que é posse?", None)).await.unwrap();
    assert_eq!(text, "Posse é o exercício de fato...");

    let invocations = mock.invocations.lock().unwrap();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].0, DEFAULT_FN_CHAT);
}

#[tokio::test]
async fn reply_without_text_is_an_error() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_CHAT, Ok(json!({ "response": "  " })));

    let err = reply(&mock, DEFAULT_FN_CHAT, None, &request("q", None)).await.unwrap_err();
    assert!(matches!(err, TutorError::EmptyReply));
    assert!(!err.is_bad_request());
}

#[tokio::test]
async fn reply_propagates_backend_failure() {
    let mock = MockBackend::default();
    mock.queue(DEFAULT_FN_CHAT, Err(BackendError::Request("timeout".into())));

    let err = reply(&mock, DEFAULT_FN_CHAT, None, &request("q", None)).await.unwrap_err();
    assert!(matches!(err, TutorError::Backend(BackendError::Request(_))));
}

#[tokio::test]
async fn bad_input_never_reaches_backend() {
    let mock = MockBackend::default();
    let _ = reply(&mock, DEFAULT_FN_CHAT, None, &request("", None)).await;
    assert!(mock.invocations.lock().unwrap().is_empty());
}
