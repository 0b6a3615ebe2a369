//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use models::api::SessionResponse;
use models::profile::{ANONYMOUS_NAME, AuthUser, UserProfile};

/// Authentication state tracking the current user, their profile and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub profile: Option<UserProfile>,
    pub loading: bool,
}

impl AuthState {
    /// State while the initial session lookup is in flight.
    #[must_use]
    pub fn pending() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// Apply the outcome of a session lookup. `None` means signed out.
    pub fn resolve(&mut self, session: Option<SessionResponse>) {
        self.loading = false;
        match session {
            Some(session) => {
                self.user = Some(session.user);
                self.profile = Some(session.profile);
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.profile = None;
        self.loading = false;
    }

    /// Name shown in the header.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(profile) = &self.profile {
            return profile.full_name.clone();
        }
        self.user
            .as_ref()
            .map_or_else(|| ANONYMOUS_NAME.to_owned(), models::profile::display_name_for)
    }

    pub fn set_full_name(&mut self, name: &str) {
        if let Some(profile) = &mut self.profile {
            name.trim().clone_into(&mut profile.full_name);
        }
    }
}

/// Whether a guarded route should bounce to `/login`.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}
