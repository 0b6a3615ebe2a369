//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and interaction surfaces while reading/writing
//! shared state from Leptos context providers.

pub mod app_header;
pub mod audio_player;
pub mod book_card;
pub mod mind_map_node;
pub mod profile_dialog;
pub mod toast_stack;
pub mod tutor_button;
pub mod tutor_overlay;
