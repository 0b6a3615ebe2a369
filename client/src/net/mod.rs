//! Networking modules for the `/api` gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser never talks to the managed backend directly; every call goes
//! through the server's gateway with the session cookie attached.

pub mod api;
