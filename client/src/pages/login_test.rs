use super::*;

#[test]
fn validate_sign_in_trims_email_and_requires_both_fields() {
    assert_eq!(
        validate_sign_in("  ana@example.com  ", "segredo"),
        Ok(("ana@example.com".to_owned(), "segredo".to_owned()))
    );
    assert_eq!(validate_sign_in("   ", "segredo"), Err("Informe e-mail e senha."));
    assert_eq!(validate_sign_in("ana@example.com", ""), Err("Informe e-mail e senha."));
}

#[test]
fn validate_sign_up_builds_request() {
    let req = validate_sign_up(" Ana Souza ", "ana@example.com", "segredo", "oab").unwrap();
    assert_eq!(req.full_name, "Ana Souza");
    assert_eq!(req.profile_type, ProfileType::Oab);
}

#[test]
fn validate_sign_up_reports_first_missing_field() {
    assert_eq!(validate_sign_up("", "ana@example.com", "x", "oab"), Err("Informe seu nome completo."));
    assert_eq!(validate_sign_up("Ana", "ana.example.com", "x", "oab"), Err("Informe um e-mail válido."));
    assert_eq!(validate_sign_up("Ana", "ana@example.com", "", "oab"), Err("Informe uma senha."));
    assert_eq!(validate_sign_up("Ana", "ana@example.com", "x", ""), Err("Escolha seu perfil."));
}
