pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, as a string per RFC 7519
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,
}

/// Signs and verifies bearer tokens with a server-held HS256 secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    secret_configured: bool,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        // No grace period past `exp`
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            secret_configured: !secret.is_empty(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, Duration::minutes(security.jwt_expiry_minutes))
    }

    /// Token lifetime in seconds, as reported to clients
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        if !self.secret_configured {
            return Err(TokenError::InvalidSecret);
        }

        let claims = Claims::new(user_id, issued_at, self.ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Check signature and expiry, returning the subject's user id.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        if !self.secret_configured {
            return Err(TokenError::InvalidSecret);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        token_data.claims.sub.parse().map_err(|_| TokenError::Malformed)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
