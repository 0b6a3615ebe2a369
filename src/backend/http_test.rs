use super::*;
use crate::backend::config::{BackendTimeouts, FunctionNames};

fn config() -> BackendConfig {
    BackendConfig {
        base_url: "https://backend.example.test".into(),
        anon_key: "anon".into(),
        timeouts: BackendTimeouts { request_secs: 5, connect_secs: 1 },
        tables: TableNames { books: "livros".into(), profiles: "perfis".into(), settings: "user_settings".into() },
        functions: FunctionNames::default(),
    }
}

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("https://b.test/", "/auth/v1/user"), "https://b.test/auth/v1/user");
    assert_eq!(endpoint("https://b.test", "rest/v1/perfis"), "https://b.test/rest/v1/perfis");
}

#[test]
fn paths_follow_service_conventions() {
    assert_eq!(table_path("biblioteca_juridica"), "/rest/v1/biblioteca_juridica");
    assert_eq!(function_path("gemini-ai-chat"), "/functions/v1/gemini-ai-chat");
    assert_eq!(eq_filter("u-1"), "eq.u-1");
}

#[test]
fn new_keeps_configured_tables() {
    let backend = HttpBackend::new(&config()).unwrap();
    assert_eq!(backend.tables.books, "livros");
    assert_eq!(backend.base_url, "https://backend.example.test");
}

#[test]
fn request_sets_apikey_and_falls_back_to_anon_bearer() {
    let backend = HttpBackend::new(&config()).unwrap();
    let anon = backend
        .request(Method::GET, "/auth/v1/user", None)
        .build()
        .unwrap();
    assert_eq!(anon.url().as_str(), "https://backend.example.test/auth/v1/user");
    assert_eq!(anon.headers()["apikey"], "anon");
    assert_eq!(anon.headers()["authorization"], "Bearer anon");

    let user = backend
        .request(Method::GET, "/auth/v1/user", Some("jwt"))
        .build()
        .unwrap();
    assert_eq!(user.headers()["authorization"], "Bearer jwt");
}

#[test]
fn sign_up_body_nests_metadata_under_data() {
    let metadata = UserMetadata { full_name: Some("Ana".into()), profile_type: Some("oab".into()) };
    let body = serde_json::to_value(SignUpBody { email: "a@x.test", password: "pw", data: &metadata }).unwrap();
    assert_eq!(body["data"]["nome_completo"], "Ana");
    assert_eq!(body["data"]["profile_type"], "oab");
}

#[test]
fn token_response_parses_as_session() {
    let json = r#"{
        "access_token": "jwt",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "r",
        "user": { "id": "u-1", "email": "a@x.test", "user_metadata": {} }
    }"#;
    let session: Session = serde_json::from_str(json).unwrap();
    assert_eq!(session.access_token, "jwt");
    assert_eq!(session.expires_in, Some(3600));
    assert_eq!(session.user.id, "u-1");
}
