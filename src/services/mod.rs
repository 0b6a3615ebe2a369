//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the request shaping and reply parsing for each
//! backend interaction so route handlers can stay focused on protocol
//! translation, cookies and status codes.

pub mod mind_map;
pub mod profile;
pub mod speech;
pub mod tutor;
