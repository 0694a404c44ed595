//! Core domain types
//!
//! Read-only snapshots of server-side state, as returned by the CI server API.

pub mod pipeline;
