//! Managed backend: auth, relational store and hosted functions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything stateful lives behind one remote service: account auth, the
//! profile and catalog tables (reached through a REST query interface), and
//! named hosted functions for chat, mind-map generation, transcription and
//! speech synthesis. Route handlers and services only see the [`Backend`]
//! trait so tests can swap in an in-memory implementation.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns [`BackendError`]. Nothing is retried here; callers
//! decide whether a failure becomes a fallback, a toast or an HTTP status.

pub mod config;
pub mod http;
pub mod types;

use models::book::Book;
use models::profile::{AuthUser, ProfileRow, Session, SettingsRow, UserMetadata};

pub use http::HttpBackend;
pub use types::BackendError;

/// Operations the gateway needs from the managed backend.
///
/// `token` is the caller's access token; store and function calls made
/// without one run with the public key's privileges.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    // --- auth ---

    /// Register an account. `redirect_to` is where the confirmation email points.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
        redirect_to: Option<&str>,
    ) -> Result<(), BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_out(&self, token: &str) -> Result<(), BackendError>;

    /// Resolve an access token to its account.
    async fn get_user(&self, token: &str) -> Result<AuthUser, BackendError>;

    // --- store ---

    async fn fetch_profile_row(&self, token: &str, user_id: &str) -> Result<Option<ProfileRow>, BackendError>;

    async fn fetch_settings_row(&self, token: &str, user_id: &str) -> Result<Option<SettingsRow>, BackendError>;

    async fn insert_profile_row(&self, token: &str, row: &ProfileRow) -> Result<(), BackendError>;

    async fn update_profile_name(&self, token: &str, user_id: &str, full_name: &str) -> Result<(), BackendError>;

    async fn list_books(&self, token: Option<&str>) -> Result<Vec<Book>, BackendError>;

    // --- functions ---

    /// Invoke a hosted function with a JSON payload and return its JSON reply.
    async fn invoke(
        &self,
        name: &str,
        token: Option<&str>,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError>;
}
