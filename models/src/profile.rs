//! Account identity and study-profile records.
//!
//! SYSTEM CONTEXT
//! ==============
//! The managed auth service owns credentials and signup metadata; the
//! relational store owns the `perfis` row (name, email) and the
//! `user_settings` row (profile category). A profile shown in the UI is the
//! merge of both, or a best-effort synthesis from signup metadata when the
//! store has nothing for the user yet.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde::{Deserialize, Serialize};

/// Display name used when neither metadata nor email yield one.
pub const ANONYMOUS_NAME: &str = "Usuário";

/// Fixed set of study profiles a student picks at signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// University student.
    Faculdade,
    /// Public-service exam candidate.
    Concurso,
    /// Bar exam candidate.
    Oab,
    /// Practicing lawyer.
    Advogado,
}

impl ProfileType {
    pub const ALL: [Self; 4] = [Self::Faculdade, Self::Concurso, Self::Oab, Self::Advogado];

    /// Parse a stored value. Unknown values yield `None` rather than an error.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "faculdade" => Some(Self::Faculdade),
            "concurso" => Some(Self::Concurso),
            "oab" => Some(Self::Oab),
            "advogado" => Some(Self::Advogado),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Faculdade => "faculdade",
            Self::Concurso => "concurso",
            Self::Oab => "oab",
            Self::Advogado => "advogado",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Faculdade => "Estudante universitário",
            Self::Concurso => "Concurseiro",
            Self::Oab => "Exame da OAB",
            Self::Advogado => "Advogado",
        }
    }
}

/// Metadata attached to the account at signup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(rename = "nome_completo", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Raw profile category; kept as text because old accounts may hold unknown values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
}

/// An authenticated account as reported by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "user_metadata", default)]
    pub metadata: UserMetadata,
}

/// A student's profile as shown in the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub profile_type: Option<ProfileType>,
}

/// A `perfis` row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub nome_completo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A `user_settings` row (only the column this app reads).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRow {
    #[serde(default)]
    pub profile_type: Option<String>,
}

/// Display name derived from signup data: metadata name, email local part, or a placeholder.
#[must_use]
pub fn display_name_for(user: &AuthUser) -> String {
    if let Some(name) = user.metadata.full_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_owned();
    }
    user.email
        .as_deref()
        .and_then(|e| e.split('@').next())
        .filter(|local| !local.is_empty())
        .map_or_else(|| ANONYMOUS_NAME.to_owned(), str::to_owned)
}

impl UserProfile {
    /// Best-effort profile synthesized from signup metadata.
    #[must_use]
    pub fn fallback_for(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            full_name: display_name_for(user),
            email: user.email.clone().unwrap_or_default(),
            profile_type: user.metadata.profile_type.as_deref().and_then(ProfileType::parse),
        }
    }

    /// Merge a stored profile row with its settings row.
    #[must_use]
    pub fn merge_settings(row: ProfileRow, settings: Option<SettingsRow>, user: &AuthUser) -> Self {
        Self {
            full_name: row
                .nome_completo
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| display_name_for(user)),
            email: row.email.or_else(|| user.email.clone()).unwrap_or_default(),
            profile_type: settings
                .and_then(|s| s.profile_type)
                .as_deref()
                .and_then(ProfileType::parse),
            id: row.id,
        }
    }

    /// The `perfis` row to insert for a user who has none.
    #[must_use]
    pub fn missing_row_for(user: &AuthUser) -> ProfileRow {
        ProfileRow {
            id: user.id.clone(),
            nome_completo: Some(display_name_for(user)),
            email: user.email.clone(),
        }
    }
}

/// An authenticated session handed back after sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires.
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}
