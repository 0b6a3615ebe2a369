//! Profile resolution for an authenticated account.
//!
//! DESIGN
//! ======
//! The profile shown to a student is assembled from two rows (`perfis` and
//! `user_settings`). A brand-new account has neither, so the first
//! resolution inserts a `perfis` row built from signup metadata. Any store
//! failure degrades to a profile synthesized from that same metadata:
//! resolution never fails, it only gets less accurate.

use tracing::{info, warn};

use models::profile::{AuthUser, SettingsRow, UserProfile};

use crate::backend::{Backend, BackendError};

/// Resolve the profile for `user`, creating the stored row if missing.
pub async fn resolve(backend: &dyn Backend, token: &str, user: &AuthUser) -> UserProfile {
    let (row, settings) = tokio::join!(
        backend.fetch_profile_row(token, &user.id),
        backend.fetch_settings_row(token, &user.id),
    );

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, user_id = %user.id, "settings fetch failed; profile type unknown");
            None
        }
    };

    match row {
        Ok(Some(row)) => UserProfile::merge_settings(row, settings, user),
        Ok(None) => create_missing(backend, token, user, settings).await,
        Err(e) => {
            warn!(error = %e, user_id = %user.id, "profile fetch failed; attempting to create it");
            create_missing(backend, token, user, settings).await
        }
    }
}

async fn create_missing(
    backend: &dyn Backend,
    token: &str,
    user: &AuthUser,
    settings: Option<SettingsRow>,
) -> UserProfile {
    let row = UserProfile::missing_row_for(user);
    match backend.insert_profile_row(token, &row).await {
        Ok(()) => {
            info!(user_id = %user.id, "created missing profile row");
            let mut profile = UserProfile::merge_settings(row, settings, user);
            if profile.profile_type.is_none() {
                profile.profile_type = UserProfile::fallback_for(user).profile_type;
            }
            profile
        }
        Err(e) => {
            warn!(error = %e, user_id = %user.id, "profile insert failed; using fallback profile");
            UserProfile::fallback_for(user)
        }
    }
}

/// Change the display name, then resolve the profile again.
///
/// # Errors
///
/// Returns the backend error when the update itself fails.
pub async fn update_name(
    backend: &dyn Backend,
    token: &str,
    user: &AuthUser,
    full_name: &str,
) -> Result<UserProfile, BackendError> {
    backend
        .update_profile_name(token, &user.id, full_name.trim())
        .await?;
    Ok(resolve(backend, token, user).await)
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
