use super::*;
use crate::state::test_helpers::{MockBackend, TOKEN, ana};
use models::profile::{ProfileRow, ProfileType};

fn seed_row(mock: &MockBackend, name: &str) {
    mock.profiles.lock().unwrap().insert(
        "u-ana".into(),
        ProfileRow { id: "u-ana".into(), nome_completo: Some(name.into()), email: Some("ana@x.test".into()) },
    );
}

#[tokio::test]
async fn resolve_merges_stored_rows() {
    let mock = MockBackend::with_user();
    seed_row(&mock, "Ana S.");
    mock.settings
        .lock()
        .unwrap()
        .insert("u-ana".into(), SettingsRow { profile_type: Some("advogado".into()) });

    let profile = resolve(&mock, TOKEN, &ana()).await;
    assert_eq!(profile.full_name, "Ana S.");
    assert_eq!(profile.profile_type, Some(ProfileType::Advogado));
}

#[tokio::test]
async fn resolve_creates_missing_row_from_metadata() {
    let mock = MockBackend::with_user();

    let profile = resolve(&mock, TOKEN, &ana()).await;
    assert_eq!(profile.full_name, "Ana Souza");
    assert_eq!(profile.profile_type, Some(ProfileType::Oab));

    let stored = mock.profiles.lock().unwrap().get("u-ana").cloned().unwrap();
    assert_eq!(stored.nome_completo.as_deref(), Some("Ana Souza"));
}

#[tokio::test]
async fn resolve_falls_back_when_insert_fails() {
    let mock = MockBackend { fail_insert: true, ..MockBackend::with_user() };

    let profile = resolve(&mock, TOKEN, &ana()).await;
    assert_eq!(profile, UserProfile::fallback_for(&ana()));
    assert!(mock.profiles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn resolve_never_fails_when_store_is_down() {
    let mock = MockBackend { fail_store: true, fail_insert: true, ..MockBackend::with_user() };

    let profile = resolve(&mock, TOKEN, &ana()).await;
    assert_eq!(profile.full_name, "Ana Souza");
    assert_eq!(profile.email, "ana@x.test");
}

#[tokio::test]
async fn update_name_persists_and_re_resolves() {
    let mock = MockBackend::with_user();
    seed_row(&mock, "Ana");

    let profile = update_name(&mock, TOKEN, &ana(), "  Ana Maria Souza ").await.unwrap();
    assert_eq!(profile.full_name, "Ana Maria Souza");
}

#[tokio::test]
async fn update_name_surfaces_store_errors() {
    let mock = MockBackend { fail_store: true, ..MockBackend::with_user() };

    let err = update_name(&mock, TOKEN, &ana(), "Nova").await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 500, .. }));
}
