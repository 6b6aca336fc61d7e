// handlers/mod.rs - one module per resource
//
// Entity handlers assume the authorization guard already ran; they never
// look at the token themselves.

pub mod actors;
pub mod movies;
pub mod public;

use serde_json::Value;

use crate::error::ApiError;

/// Ids are SERIAL integers, so a path segment that does not parse names no
/// record.
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim().parse::<i32>().map_err(|_| ApiError::NotFound)
}

/// Bodies must be JSON objects. Derived deserializers would otherwise bind
/// an array to struct fields by position.
pub(crate) fn json_object(body: Value) -> Result<Value, &'static str> {
    if body.is_object() {
        Ok(body)
    } else {
        Err("request body must be a JSON object")
    }
}
