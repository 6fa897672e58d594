use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Fallback signing secret for local development only. Production presets
/// leave the secret empty so that a missing `SECRET_KEY` fails token issuance.
const DEV_JWT_SECRET: &str = "catalog-api-dev-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

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
            self.database.url = v;
        }
        if let Some(v) = parse_env("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v;
        }
        if let Some(v) = parse_env("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v;
        }

        // API overrides
        if let Ok(v) = env::var("API_HOST") {
            self.api.host = v;
        }
        if let Some(port) = parse_env("API_PORT").or_else(|| parse_env("PORT")) {
            self.api.port = port;
        }
        if let Some(v) = parse_env("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SECRET_KEY").or_else(|_| env::var("JWT_SECRET")) {
            self.security.jwt_secret = v;
        }
        if let Some(v) = parse_env("JWT_EXPIRY_MINUTES") {
            self.security.jwt_expiry_minutes = v;
        }
        if let Some(v) = parse_env("BCRYPT_COST") {
            self.security.bcrypt_cost = v;
        }
        if let Some(v) = parse_env("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite://catalog.db?mode=rwc".to_string(),
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_minutes: 30,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "sqlite://catalog.db?mode=rwc".to_string(),
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_minutes: 30,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "sqlite://catalog.db?mode=rwc".to_string(),
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_minutes: 30,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    /// Configuration for in-process tests: private in-memory store, fast hashing.
    pub fn testing() -> Self {
        let mut config = Self::development();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.security.jwt_secret = "test-secret".to_string();
        config.security.bcrypt_cost = 4;
        config
    }
}

/// Typed value of `key`, or `None` when unset. A value that does not parse
/// is logged and ignored so the preset stays in effect.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring malformed environment value");
            None
        }
    }
}
