pub mod error;
pub mod jwks;
pub mod permissions;
pub mod validator;

pub use error::AuthError;
pub use jwks::{KeySource, RemoteKeySource, StaticKeySource};
pub use permissions::check_permission;
pub use validator::{bearer_token, TokenValidator};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Verified token payload. Lives for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default)]
    pub aud: Option<Audience>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Absent when the API's RBAC settings do not add permissions to tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// `aud` may be a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|a| a == audience),
        }
    }
}
