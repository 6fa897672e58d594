use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Public projection of a user; the password hash is never selected into it.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub creado_en: DateTime<Utc>,
}

/// Login lookup row
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub contrasena: String,
}

/// Merge-patch changes for a user; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub contrasena_hash: Option<String>,
}
