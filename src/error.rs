// HTTP API Error Types
use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::AuthError;
use crate::database::manager::DatabaseError;
use crate::database::models::ValidationError;

/// Every failure a request can end in.
///
/// The `String` payloads carry internal detail for the logs; clients only
/// ever see the fixed short message for the status.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400/401/403/500 raised by the authorization guard
    #[error(transparent)]
    Auth(#[from] AuthError),

    // 400 Bad Request
    #[error("bad request: {0}")]
    BadRequest(String),

    // 404 Not Found
    #[error("resource not found")]
    NotFound,

    // 405 Method Not Allowed
    #[error("method not allowed")]
    MethodNotAllowed,

    // 422 Unprocessable Entity
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    // 500 Internal Server Error
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(err) => err.status(),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> String {
        match self {
            ApiError::Auth(err) => err.to_string(),
            ApiError::BadRequest(_) => "bad request".to_string(),
            ApiError::NotFound => "resource not found".to_string(),
            ApiError::MethodNotAllowed => "method not allowed".to_string(),
            ApiError::Unprocessable(_) => "unprocessable".to_string(),
            ApiError::Internal(_) => "internal server error".to_string(),
        }
    }

    /// `{success: false, error: <status>, message}`; auth failures add `code`.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.message(),
        });
        if let ApiError::Auth(err) = self {
            body["code"] = json!(err.code());
        }
        body
    }

    pub fn bad_request(detail: impl ToString) -> Self {
        ApiError::BadRequest(detail.to_string())
    }

    pub fn unprocessable(detail: impl ToString) -> Self {
        ApiError::Unprocessable(detail.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Validation(e) => ApiError::unprocessable(e),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::unprocessable(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match &self {
            ApiError::Auth(err) => tracing::warn!("Authorization failed ({}): {}", err.code(), err),
            ApiError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            ApiError::BadRequest(detail) | ApiError::Unprocessable(detail) => {
                tracing::debug!("Rejected request ({}): {}", status, detail)
            }
            ApiError::NotFound | ApiError::MethodNotAllowed => {}
        }
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_body() {
        let body = ApiError::NotFound.to_json();
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }

    #[test]
    fn detail_is_not_exposed() {
        let err = ApiError::unprocessable("null value in column \"name\"");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_json()["message"], "unprocessable");
    }

    #[test]
    fn auth_errors_carry_code() {
        let body = ApiError::from(AuthError::HeaderMissing).to_json();
        assert_eq!(body["error"], 401);
        assert_eq!(body["code"], "authorization_header_missing");
        assert_eq!(body["message"], "Authorization header is expected.");
    }

    #[test]
    fn database_errors_map_by_kind() {
        let validation = ApiError::from(DatabaseError::Validation(ValidationError::Required("name")));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = ApiError::from(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
