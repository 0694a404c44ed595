//! Pipeline Resource Core
//!
//! Core types shared by the pipeline resource crates.
//!
//! This crate contains:
//! - Domain types: pipelines as the CI server reports them
//! - DTOs: the request/response documents exchanged with the CI step
//! - Flag parsing: strict boolean-as-string parameters

pub mod domain;
pub mod dto;
pub mod error;
pub mod flag;

pub use error::InputError;
