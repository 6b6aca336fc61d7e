use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;

use super::error::AuthError;
use crate::config::AuthConfig;

/// Where the validator gets the provider's signing keys from.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn key_set(&self) -> Result<JwkSet, AuthError>;
}

/// Fetches `https://<domain>/.well-known/jwks.json` on every call.
#[derive(Clone)]
pub struct RemoteKeySource {
    http_client: Client,
    jwks_url: url::Url,
}

impl RemoteKeySource {
    pub fn new(config: &AuthConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            http_client: Client::new(),
            jwks_url: config.jwks_url()?,
        })
    }

    pub fn jwks_url(&self) -> &url::Url {
        &self.jwks_url
    }
}

#[async_trait]
impl KeySource for RemoteKeySource {
    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!("Fetching JWKS from: {}", self.jwks_url);

        let response = self
            .http_client
            .get(self.jwks_url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("Failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AuthError::KeySetUnavailable(format!(
                "JWKS fetch failed with status: {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("Failed to parse JWKS: {}", e)))
    }
}

/// A fixed key set, for tests and air-gapped runs.
#[derive(Debug, Clone)]
pub struct StaticKeySource {
    keys: JwkSet,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        Ok(self.keys.clone())
    }
}
