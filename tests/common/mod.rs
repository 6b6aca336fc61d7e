#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use casting_api::auth::permissions::*;
use casting_api::auth::StaticKeySource;
use casting_api::config::AppConfig;
use casting_api::database::models::{ActorFields, MovieFields};
use casting_api::database::{CastingStore, MemoryStore};
use casting_api::{app, AppState};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_DOMAIN: &str = "casting-test.example.com";
pub const TEST_AUDIENCE: &str = "casting-info";
pub const TEST_KID: &str = "casting-test-key";

const SIGNING_KEY: &[u8] = include_bytes!("../fixtures/signing_key.pem");
const JWKS: &str = include_str!("../fixtures/jwks.json");

pub const ASSISTANT: &[&str] = &[READ_ACTORS, READ_MOVIES];
pub const DIRECTOR: &[&str] = &[
    READ_ACTORS,
    READ_MOVIES,
    CREATE_ACTORS,
    DELETE_ACTORS,
    UPDATE_ACTORS,
    UPDATE_MOVIES,
];
pub const PRODUCER: &[&str] = &[
    READ_ACTORS,
    READ_MOVIES,
    CREATE_ACTORS,
    DELETE_ACTORS,
    UPDATE_ACTORS,
    UPDATE_MOVIES,
    CREATE_MOVIES,
    DELETE_MOVIES,
];

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.domain = TEST_DOMAIN.to_string();
    config.auth.audience = TEST_AUDIENCE.to_string();
    config.auth.algorithms = vec![Algorithm::RS256];
    config
}

/// In-process application backed by the in-memory store and the fixture key set.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let keys = Arc::new(StaticKeySource::from_json(JWKS)?);
        let router = app(AppState::new(config, store.clone(), keys));
        Ok(Self { router, store })
    }

    /// Two actors and two movies, ids 1 and 2 of each.
    pub async fn seeded() -> Result<Self> {
        let app = Self::new()?;
        app.store
            .insert_actor(ActorFields {
                name: "Jane Doe".to_string(),
                gender: Some("female".to_string()),
                age: Some(34),
            })
            .await?;
        app.store
            .insert_actor(ActorFields {
                name: "John Roe".to_string(),
                gender: Some("male".to_string()),
                age: Some(41),
            })
            .await?;
        app.store
            .insert_movie(MovieFields {
                title: "Arrival".to_string(),
                release_date: Some("2016-11-11".parse()?),
            })
            .await?;
        app.store
            .insert_movie(MovieFields {
                title: "Heat".to_string(),
                release_date: None,
            })
            .await?;
        Ok(app)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };
        self.raw(builder.body(body)?).await
    }

    /// Sends a prebuilt request; useful for odd headers and bodies.
    pub async fn raw(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, value))
    }
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Baseline claims a valid token for this API carries.
pub fn claims(permissions: &[&str]) -> Value {
    json!({
        "iss": format!("https://{}/", TEST_DOMAIN),
        "sub": "auth0|casting-test-user",
        "aud": [TEST_AUDIENCE, format!("https://{}/userinfo", TEST_DOMAIN)],
        "iat": now(),
        "exp": now() + 3600,
        "permissions": permissions,
    })
}

pub fn sign(claims: &Value) -> String {
    sign_with_kid(claims, Some(TEST_KID))
}

pub fn sign_with_kid(claims: &Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY).expect("fixture signing key");
    encode(&header, claims, &key).expect("sign token")
}

pub fn token_for(permissions: &[&str]) -> String {
    sign(&claims(permissions))
}
