//! # client
//!
//! Leptos + WASM frontend for the LexDesk legal study app.
//!
//! This crate contains pages, components, application state and the HTTP
//! client for the `/api` gateway. The server crate renders `app::shell` for
//! SSR; the `hydrate` feature builds the browser bundle that takes over.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attaches the reactive app to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
