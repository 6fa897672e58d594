use std::sync::Arc;

use crate::auth::password::PasswordHasher;
use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::{Database, DatabaseError};

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenIssuer,
    pub passwords: PasswordHasher,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to the store, bootstrap the schema and wire up the auth components.
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        let db = Database::connect(&config.database).await?;
        db.migrate().await?;

        Ok(Self {
            db,
            tokens: TokenIssuer::from_config(&config.security),
            passwords: PasswordHasher::new(config.security.bcrypt_cost),
            config: Arc::new(config),
        })
    }
}
