//! Data Transfer Objects
//!
//! Documents exchanged between the CI step runner and this resource. The
//! runner writes one request to stdin and reads one response from stdout.

pub mod out;
