use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::user::UserChanges;
use crate::database::models::{User, UserCredentials};
use crate::database::DatabaseError;

const COLUMNS: &str = "id, nombre, correo, creado_en";

/// The `correo` unique constraint backs up the handler-level duplicate check.
fn map_write_error(err: sqlx::Error) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DatabaseError::DuplicateEmail,
        _ => DatabaseError::Sqlx(err),
    }
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Usuario {} no encontrado", id))
}

pub async fn select_all(pool: &SqlitePool) -> Result<Vec<User>, DatabaseError> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM usuarios ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn select_404(pool: &SqlitePool, id: i64) -> Result<User, DatabaseError> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM usuarios WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn find_credentials(pool: &SqlitePool, correo: &str) -> Result<Option<UserCredentials>, DatabaseError> {
    let credentials = sqlx::query_as::<_, UserCredentials>("SELECT id, contrasena FROM usuarios WHERE correo = ?")
        .bind(correo)
        .fetch_optional(pool)
        .await?;

    Ok(credentials)
}

/// True when another user (not `except_id`) already holds `correo`.
pub async fn email_taken(pool: &SqlitePool, correo: &str, except_id: Option<i64>) -> Result<bool, DatabaseError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios WHERE correo = ? AND id IS NOT ?")
        .bind(correo)
        .bind(except_id)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

pub async fn insert(
    pool: &SqlitePool,
    nombre: &str,
    correo: &str,
    contrasena_hash: &str,
) -> Result<User, DatabaseError> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO usuarios (nombre, correo, contrasena, creado_en) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(nombre)
    .bind(correo)
    .bind(contrasena_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(map_write_error)
}

/// Merge patch: absent fields keep their stored value.
pub async fn update(pool: &SqlitePool, id: i64, changes: &UserChanges) -> Result<User, DatabaseError> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE usuarios SET \
             nombre = COALESCE(?, nombre), \
             correo = COALESCE(?, correo), \
             contrasena = COALESCE(?, contrasena) \
         WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(changes.nombre.as_deref())
    .bind(changes.correo.as_deref())
    .bind(changes.contrasena_hash.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_write_error)?
    .ok_or_else(|| not_found(id))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM usuarios WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    Ok(())
}
