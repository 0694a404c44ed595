//! Input validation errors

use thiserror::Error;

/// Errors raised while interpreting a request document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A boolean-as-string parameter holds something other than a boolean literal
    #[error("invalid value for {field}: {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    /// `source.teams` is empty
    #[error("source.teams must contain at least one team")]
    MissingTeam,

    /// A required field is absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
