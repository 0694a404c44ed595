//! Boolean-as-string parameters
//!
//! Request flags such as `present` and `unpause` travel as optional strings.
//! An absent or empty flag takes its default; anything else must be one of
//! the literals below, otherwise the request is rejected.

use serde::{Deserialize, Deserializer};

use crate::error::InputError;

const TRUE_LITERALS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];
const FALSE_LITERALS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

/// Resolve an optional flag string to a boolean
///
/// # Arguments
/// * `field` - Name of the flag, used in the error message
/// * `value` - Raw flag value from the request
/// * `default` - Value used when the flag is absent or empty
pub fn parse_flag(
    field: &'static str,
    value: Option<&str>,
    default: bool,
) -> Result<bool, InputError> {
    match value {
        None | Some("") => Ok(default),
        Some(v) if TRUE_LITERALS.contains(&v) => Ok(true),
        Some(v) if FALSE_LITERALS.contains(&v) => Ok(false),
        Some(v) => Err(InputError::InvalidFlag {
            field,
            value: v.to_string(),
        }),
    }
}

/// Deserialize a flag given either as a string or as a JSON boolean
///
/// Booleans are stored as their string form so that every flag goes through
/// [`parse_flag`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(|raw| match raw {
        RawFlag::Bool(b) => b.to_string(),
        RawFlag::Text(s) => s,
    }))
}
