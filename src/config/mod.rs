use jsonwebtoken::Algorithm;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

const DEFAULT_AUTH0_DOMAIN: &str = "capstone-casting-k44.us.auth0.com";
const DEFAULT_API_AUDIENCE: &str = "casting-info";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

/// Identity provider settings used to verify bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub domain: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
}

impl AuthConfig {
    /// Expected `iss` claim: `https://<domain>/`.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain.trim_end_matches('/'))
    }

    pub fn jwks_url(&self) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&self.issuer())?.join(".well-known/jwks.json")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub excited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH0_DOMAIN") {
            self.auth.domain = v;
        }
        if let Ok(v) = env::var("API_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Ok(v) = env::var("ALGORITHMS") {
            self.auth.algorithms = parse_algorithms(&v);
        }

        // API overrides
        if let Some(port) = env::var("CASTING_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("EXCITED") {
            self.api.excited = v == "true";
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    fn base(environment: Environment, max_connections: u32, connection_timeout: u64) -> Self {
        Self {
            environment,
            database: DatabaseConfig {
                url: None,
                max_connections,
                connection_timeout,
            },
            auth: AuthConfig {
                domain: DEFAULT_AUTH0_DOMAIN.to_string(),
                audience: DEFAULT_API_AUDIENCE.to_string(),
                algorithms: vec![Algorithm::RS256],
            },
            api: ApiConfig {
                port: 8080,
                excited: false,
            },
            security: SecurityConfig { enable_cors: true },
        }
    }

    pub fn development() -> Self {
        Self::base(Environment::Development, 10, 30)
    }

    pub fn staging() -> Self {
        Self::base(Environment::Staging, 20, 10)
    }

    pub fn production() -> Self {
        Self::base(Environment::Production, 50, 5)
    }
}

/// Parses a comma separated algorithm list such as `RS256,RS384`.
/// Unknown names are skipped; an empty result falls back to RS256.
pub fn parse_algorithms(raw: &str) -> Vec<Algorithm> {
    let algorithms: Vec<Algorithm> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|name| match Algorithm::from_str(name) {
            Ok(alg) => Some(alg),
            Err(_) => {
                tracing::warn!("Ignoring unknown signing algorithm: {}", name);
                None
            }
        })
        .collect();

    if algorithms.is_empty() {
        vec![Algorithm::RS256]
    } else {
        algorithms
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.audience, "casting-info");
        assert_eq!(config.auth.algorithms, vec![Algorithm::RS256]);
        assert!(!config.api.excited);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.connection_timeout, 5);
    }

    #[test]
    fn issuer_and_jwks_url_follow_domain() {
        let mut config = AppConfig::development();
        config.auth.domain = "casting.example.com".to_string();
        assert_eq!(config.auth.issuer(), "https://casting.example.com/");
        assert_eq!(
            config.auth.jwks_url().unwrap().as_str(),
            "https://casting.example.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn parses_algorithm_lists() {
        assert_eq!(
            parse_algorithms("RS256, RS384"),
            vec![Algorithm::RS256, Algorithm::RS384]
        );
        assert_eq!(parse_algorithms("bogus"), vec![Algorithm::RS256]);
        assert_eq!(parse_algorithms(""), vec![Algorithm::RS256]);
    }
}
