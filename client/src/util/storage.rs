//! Browser localStorage helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The onboarding flag is the only state the app keeps in the browser. These
//! helpers centralize hydrate-only read/write behavior so pages never repeat
//! web-sys glue; SSR paths no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Set once the first-visit onboarding has been dismissed.
pub const INTRO_SEEN_KEY: &str = "intro_seen_v1";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

fn storage_available() -> bool {
    #[cfg(feature = "hydrate")]
    {
        local_storage().is_some()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Whether onboarding was already shown in this browser.
///
/// Without `localStorage` (including server rendering) this reports `true`,
/// so the intro is only ever mounted after hydration and never loops.
pub fn intro_seen() -> bool {
    !storage_available() || load_json::<bool>(INTRO_SEEN_KEY).unwrap_or(false)
}

pub fn mark_intro_seen() {
    save_json(INTRO_SEEN_KEY, &true);
}
