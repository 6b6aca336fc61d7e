pub mod actor;
pub mod field;
pub mod movie;

pub use actor::{Actor, ActorFields, ActorPatch, NewActor};
pub use field::Field;
pub use movie::{Movie, MovieFields, MoviePatch, NewMovie, ReleaseDate};

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

/// Column width shared by every text column (`VARCHAR(120)`).
pub const MAX_TEXT_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    Required(&'static str),

    #[error("field '{0}' exceeds {MAX_TEXT_LEN} characters")]
    TooLong(&'static str),

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Rejects missing, blank, and over-long values for a NOT NULL text column.
pub(crate) fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Required(field))?;
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong(field));
    }
    Ok(value)
}

/// Length check for a nullable text column.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if v.chars().count() > MAX_TEXT_LEN => Err(ValidationError::TooLong(field)),
        other => Ok(other),
    }
}

/// An integer body value that also accepts a numeric string, so
/// `{"age": "50"}` binds the same as `{"age": 50}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntValue(pub i32);

impl<'de> Deserialize<'de> for IntValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(Self(value)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", text))),
        }
    }
}
