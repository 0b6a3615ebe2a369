use super::*;

fn user(name: Option<&str>, email: Option<&str>, profile_type: Option<&str>) -> AuthUser {
    AuthUser {
        id: "u-1".to_owned(),
        email: email.map(str::to_owned),
        metadata: UserMetadata {
            full_name: name.map(str::to_owned),
            profile_type: profile_type.map(str::to_owned),
        },
    }
}

// =============================================================
// ProfileType
// =============================================================

#[test]
fn profile_type_parses_known_values_only() {
    for kind in ProfileType::ALL {
        assert_eq!(ProfileType::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(ProfileType::parse("juiz"), None);
    assert_eq!(ProfileType::parse(""), None);
}

#[test]
fn profile_type_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ProfileType::Oab).unwrap(), "\"oab\"");
    assert_eq!(serde_json::from_str::<ProfileType>("\"concurso\"").unwrap(), ProfileType::Concurso);
}

// =============================================================
// Display name + fallback
// =============================================================

#[test]
fn display_name_prefers_metadata() {
    assert_eq!(display_name_for(&user(Some("Ana Souza"), Some("ana@x.test"), None)), "Ana Souza");
}

#[test]
fn display_name_uses_email_local_part() {
    assert_eq!(display_name_for(&user(Some("  "), Some("bruno@x.test"), None)), "bruno");
}

#[test]
fn display_name_without_anything_is_placeholder() {
    assert_eq!(display_name_for(&user(None, None, None)), ANONYMOUS_NAME);
    assert_eq!(display_name_for(&user(None, Some("@x.test"), None)), ANONYMOUS_NAME);
}

#[test]
fn fallback_profile_uses_signup_metadata() {
    let p = UserProfile::fallback_for(&user(None, Some("carla@x.test"), Some("oab")));
    assert_eq!(p.id, "u-1");
    assert_eq!(p.full_name, "carla");
    assert_eq!(p.email, "carla@x.test");
    assert_eq!(p.profile_type, Some(ProfileType::Oab));
}

#[test]
fn fallback_profile_drops_unknown_category() {
    let p = UserProfile::fallback_for(&user(Some("D"), None, Some("estagiario")));
    assert_eq!(p.profile_type, None);
    assert_eq!(p.email, "");
}

// =============================================================
// Row merge
// =============================================================

#[test]
fn merge_settings_reads_category_from_settings() {
    let row = ProfileRow { id: "u-1".to_owned(), nome_completo: Some("Eva".to_owned()), email: Some("eva@x.test".to_owned()) };
    let settings = SettingsRow { profile_type: Some("advogado".to_owned()) };
    let p = UserProfile::merge_settings(row, Some(settings), &user(None, None, None));
    assert_eq!(p.full_name, "Eva");
    assert_eq!(p.profile_type, Some(ProfileType::Advogado));
}

#[test]
fn merge_settings_without_settings_has_no_category() {
    let row = ProfileRow { id: "u-1".to_owned(), nome_completo: None, email: None };
    let p = UserProfile::merge_settings(row, None, &user(Some("Fábio"), Some("f@x.test"), Some("oab")));
    assert_eq!(p.full_name, "Fábio");
    assert_eq!(p.email, "f@x.test");
    assert_eq!(p.profile_type, None);
}

#[test]
fn missing_row_is_built_from_signup_data() {
    let row = UserProfile::missing_row_for(&user(None, Some("gil@x.test"), None));
    assert_eq!(row.nome_completo.as_deref(), Some("gil"));
    assert_eq!(row.email.as_deref(), Some("gil@x.test"));
}

#[test]
fn auth_user_reads_user_metadata_field() {
    let json = serde_json::json!({
        "id": "u-9",
        "email": "h@x.test",
        "user_metadata": { "nome_completo": "Helena", "profile_type": "faculdade" },
        "aud": "authenticated"
    });
    let u: AuthUser = serde_json::from_value(json).unwrap();
    assert_eq!(u.metadata.full_name.as_deref(), Some("Helena"));
    assert_eq!(u.metadata.profile_type.as_deref(), Some("faculdade"));
}
