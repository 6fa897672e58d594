use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Unknown category: {0}")]
    UnknownCategory(i64),

    #[error("Price out of range: {0}")]
    InvalidPrice(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Table definitions, applied in order at startup.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categorias (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre VARCHAR(100) NOT NULL
    )
    "#,
    // Prices are stored as integer hundredths (2 fixed decimal places)
    r#"
    CREATE TABLE IF NOT EXISTS productos (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre          VARCHAR(100) NOT NULL,
        precio_centimos INTEGER NOT NULL,
        categoria_id    INTEGER REFERENCES categorias (id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS usuarios (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre     VARCHAR(100) NOT NULL,
        correo     VARCHAR(100) NOT NULL UNIQUE,
        contrasena VARCHAR(255) NOT NULL,
        creado_en  TIMESTAMP NOT NULL
    )
    "#,
];

/// Handle to the backing store. Constructed once at startup and shared
/// through the application state; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .foreign_keys(true)
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // An in-memory database lives only as long as its connection; keep
        // exactly one and never retire it.
        if config.url.contains(":memory:") {
            if config.max_connections > 1 {
                warn!(
                    requested = config.max_connections,
                    "In-memory database limited to a single connection"
                );
            }
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        info!("Created database pool for: {}", config.url);

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create any missing tables
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
