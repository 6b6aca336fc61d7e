use axum::http::StatusCode;
use thiserror::Error;

/// Authorization failures raised before a handler runs.
///
/// `Display` is the human-readable description sent to the client; `code()`
/// is the machine-readable counterpart.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    HeaderMissing,

    #[error("{0}")]
    HeaderMalformed(&'static str),

    #[error("Authorization malformed.")]
    TokenMalformed,

    #[error("Unable to fetch signing keys.")]
    KeySetUnavailable(String),

    #[error("Unable to find the appropriate key.")]
    KeyNotFound,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Unable to parse authentication token.")]
    InvalidToken(String),

    #[error("Permissions were not included in the payload.")]
    PermissionsMissing,

    #[error("Permission string is not in the payload permissions array")]
    PermissionDenied(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::HeaderMissing => "authorization_header_missing",
            AuthError::HeaderMalformed(_) => "malformed_header",
            AuthError::TokenMalformed | AuthError::KeyNotFound | AuthError::InvalidToken(_) => {
                "invalid_header"
            }
            AuthError::KeySetUnavailable(_) => "jwks_unavailable",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::PermissionsMissing | AuthError::PermissionDenied(_) => "invalid_permission",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::HeaderMissing
            | AuthError::HeaderMalformed(_)
            | AuthError::TokenMalformed
            | AuthError::TokenExpired
            | AuthError::InvalidClaims => StatusCode::UNAUTHORIZED,
            AuthError::KeyNotFound | AuthError::InvalidToken(_) | AuthError::PermissionsMissing => {
                StatusCode::BAD_REQUEST
            }
            AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AuthError::KeySetUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
