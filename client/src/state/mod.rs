//! Client state held in `RwSignal` contexts.
//!
//! DESIGN
//! ======
//! Every struct here is plain data with pure transition methods so that
//! pages only orchestrate I/O and the transitions stay unit-testable
//! without a browser.

pub mod audio;
pub mod auth;
pub mod library;
pub mod mind_maps;
pub mod tutor;
pub mod ui;
