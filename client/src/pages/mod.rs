//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Every page except `login` redirects anonymous visitors.

pub mod home;
pub mod library;
pub mod login;
pub mod mind_maps;
pub mod reader;
