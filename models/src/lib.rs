//! Shared domain model for the LexDesk server, browser client and CLI.
//!
//! This crate owns the records exchanged over the `/api` gateway and the
//! pure transforms the views run over them: catalog filtering and ordering,
//! tutor prompt assembly, mind-map tree editing and export, and profile
//! fallback synthesis. Nothing here performs I/O.

pub mod api;
pub mod book;
pub mod chat;
pub mod mind_map;
pub mod profile;
