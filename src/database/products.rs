use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::database::models::product::price_to_cents;
use crate::database::models::{Product, ProductRow};
use crate::database::DatabaseError;

const COLUMNS: &str = "id, nombre, precio_centimos, categoria_id";

/// Editable product fields. Writes replace all of them.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub nombre: String,
    pub precio: Decimal,
    pub categoria_id: Option<i64>,
}

fn map_write_error(err: sqlx::Error, categoria_id: Option<i64>) -> DatabaseError {
    match (&err, categoria_id) {
        (sqlx::Error::Database(db_err), Some(id)) if db_err.is_foreign_key_violation() => {
            DatabaseError::UnknownCategory(id)
        }
        _ => DatabaseError::Sqlx(err),
    }
}

pub async fn select_all(pool: &SqlitePool) -> Result<Vec<Product>, DatabaseError> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!("SELECT {COLUMNS} FROM productos ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn select_404(pool: &SqlitePool, id: i64) -> Result<Product, DatabaseError> {
    sqlx::query_as::<_, ProductRow>(&format!("SELECT {COLUMNS} FROM productos WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Product::from)
        .ok_or_else(|| DatabaseError::NotFound(format!("Producto {} no encontrado", id)))
}

pub async fn insert(pool: &SqlitePool, fields: &ProductFields) -> Result<Product, DatabaseError> {
    let cents = price_to_cents(fields.precio)?;

    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "INSERT INTO productos (nombre, precio_centimos, categoria_id) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&fields.nombre)
    .bind(cents)
    .bind(fields.categoria_id)
    .fetch_one(pool)
    .await
    .map_err(|e| map_write_error(e, fields.categoria_id))?;

    Ok(row.into())
}

pub async fn update(pool: &SqlitePool, id: i64, fields: &ProductFields) -> Result<Product, DatabaseError> {
    let cents = price_to_cents(fields.precio)?;

    sqlx::query_as::<_, ProductRow>(&format!(
        "UPDATE productos SET nombre = ?, precio_centimos = ?, categoria_id = ? WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(&fields.nombre)
    .bind(cents)
    .bind(fields.categoria_id)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_write_error(e, fields.categoria_id))?
    .map(Product::from)
    .ok_or_else(|| DatabaseError::NotFound(format!("Producto {} no encontrado", id)))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM productos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("Producto {} no encontrado", id)));
    }

    Ok(())
}
