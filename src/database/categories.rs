use sqlx::SqlitePool;

use crate::database::models::Category;
use crate::database::DatabaseError;

pub async fn select_all(pool: &SqlitePool) -> Result<Vec<Category>, DatabaseError> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, nombre FROM categorias ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

pub async fn select_one(pool: &SqlitePool, id: i64) -> Result<Option<Category>, DatabaseError> {
    let category = sqlx::query_as::<_, Category>("SELECT id, nombre FROM categorias WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

pub async fn select_404(pool: &SqlitePool, id: i64) -> Result<Category, DatabaseError> {
    select_one(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Categoría {} no encontrada", id)))
}

pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, DatabaseError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categorias WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

pub async fn insert(pool: &SqlitePool, nombre: &str) -> Result<Category, DatabaseError> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categorias (nombre) VALUES (?) RETURNING id, nombre",
    )
    .bind(nombre)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

/// Full replace of the editable columns
pub async fn update(pool: &SqlitePool, id: i64, nombre: &str) -> Result<Category, DatabaseError> {
    sqlx::query_as::<_, Category>(
        "UPDATE categorias SET nombre = ? WHERE id = ? RETURNING id, nombre",
    )
    .bind(nombre)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Categoría {} no encontrada", id)))
}

/// Referencing products keep existing with `categoria_id` cleared by the foreign key.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM categorias WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("Categoría {} no encontrada", id)));
    }

    Ok(())
}
