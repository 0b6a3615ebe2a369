//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! gateway itself keeps no session or catalog data; everything lives in the
//! managed backend, so the state is just the backend handle plus the few
//! settings handlers need per request.

use std::sync::Arc;

use crate::backend::Backend;
use crate::backend::config::FunctionNames;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub functions: Arc<FunctionNames>,
    /// Where sign-up confirmation emails redirect.
    pub site_url: Option<String>,
    /// Whether the session cookie is marked `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, functions: FunctionNames, site_url: Option<String>, cookie_secure: bool) -> Self {
        Self { backend, functions: Arc::new(functions), site_url, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
