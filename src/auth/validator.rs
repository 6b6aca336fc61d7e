use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::sync::Arc;

use super::error::AuthError;
use super::jwks::KeySource;
use super::Claims;
use crate::config::AuthConfig;

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// The header must split on whitespace into exactly two parts and the
/// scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::HeaderMissing)?;
    let header = header.to_str().map_err(|_| {
        AuthError::HeaderMalformed("Authorization header must be bearer token.")
    })?;

    let parts: Vec<&str> = header.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(AuthError::HeaderMissing),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => {
            Err(AuthError::HeaderMalformed("Header must start with bearer"))
        }
        [_] => Err(AuthError::HeaderMalformed("Token not found.")),
        [_, token] => Ok((*token).to_string()),
        _ => Err(AuthError::HeaderMalformed(
            "Authorization header must be bearer token.",
        )),
    }
}

/// Verifies provider-issued tokens against the provider's key set.
pub struct TokenValidator {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig, keys: Arc<dyn KeySource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        if !config.algorithms.is_empty() {
            validation.algorithms = config.algorithms.clone();
        }
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = 0;

        Self { keys, validation }
    }

    /// Checks signature, audience, issuer and expiry, returning the claims.
    /// The key set is fetched fresh for every token.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::TokenMalformed)?;
        let kid = header.kid.ok_or(AuthError::TokenMalformed)?;

        let key_set = self.keys.key_set().await?;
        let jwk = key_set.find(&kid).ok_or_else(|| {
            tracing::debug!("No signing key matches kid {}", kid);
            AuthError::KeyNotFound
        })?;
        let decoding_key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::InvalidToken(format!("unusable key {}: {}", kid, e)))?;

        tracing::debug!("Validating token with kid: {}, algorithm: {:?}", kid, header.alg);

        let token_data =
            decode::<Claims>(token, &decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidAudience
                    | ErrorKind::InvalidIssuer
                    | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
