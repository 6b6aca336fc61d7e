use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{bearer_token, check_permission, TokenValidator};
use crate::error::ApiError;

/// Per-route authorization state: which validator to use and which
/// permission the route requires.
#[derive(Clone)]
pub struct PermissionGuard {
    validator: Arc<TokenValidator>,
    permission: &'static str,
}

impl PermissionGuard {
    pub fn new(validator: Arc<TokenValidator>, permission: &'static str) -> Self {
        Self {
            validator,
            permission,
        }
    }

    pub fn permission(&self) -> &'static str {
        self.permission
    }
}

/// Validates the bearer token and the guard's permission, then hands the
/// claims to the handler through request extensions. Failures never reach
/// the handler.
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;
    let claims = guard.validator.verify(&token).await?;
    check_permission(guard.permission, &claims)?;

    tracing::debug!(
        "Authorized {} {} for {}",
        request.method(),
        request.uri().path(),
        guard.permission()
    );

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
