// /api/productos and /api/productos/:id

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::database::models::Product;
use crate::database::products::{self, ProductFields};
use crate::database::{categories, DatabaseError};
use crate::error::ApiError;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    #[serde(alias = "name")]
    pub nombre: Option<String>,
    #[serde(alias = "price")]
    pub precio: Option<Decimal>,
    #[serde(alias = "categoryId", alias = "category_id")]
    pub categoria_id: Option<i64>,
}

impl ProductPayload {
    /// Both create and update take the complete field set; a missing
    /// `categoria_id` means "no category".
    fn validate(self) -> Result<ProductFields, ApiError> {
        let mut errors = FieldErrors::default();
        let nombre = errors.require_text("nombre", self.nombre);
        let precio = errors.require("precio", self.precio);

        match (nombre, precio) {
            (Some(nombre), Some(precio)) => Ok(ProductFields {
                nombre,
                precio,
                categoria_id: self.categoria_id,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

/// The referenced category must exist at the time it is set.
async fn ensure_category(state: &AppState, categoria_id: Option<i64>) -> Result<(), ApiError> {
    if let Some(id) = categoria_id {
        if !categories::exists(state.db.pool(), id).await? {
            return Err(DatabaseError::UnknownCategory(id).into());
        }
    }
    Ok(())
}

/// GET /api/productos
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = products::select_all(state.db.pool()).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/productos/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Product> {
    let Path(id) = path?;
    let product = products::select_404(state.db.pool(), id).await?;
    Ok(ApiResponse::success(product))
}

/// POST /api/productos
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(payload) = payload?;
    let fields = payload.validate()?;
    ensure_category(&state, fields.categoria_id).await?;

    let product = products::insert(state.db.pool(), &fields).await?;
    tracing::info!(product_id = product.id, actor = auth.user_id, "Created product");

    Ok(ApiResponse::created(product))
}

/// PUT /api/productos/:id - full replace
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ApiResult<Product> {
    let Path(id) = path?;
    let Json(payload) = payload?;

    let pool = state.db.pool();
    products::select_404(pool, id).await?;

    let fields = payload.validate()?;
    ensure_category(&state, fields.categoria_id).await?;

    let product = products::update(pool, id, &fields).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /api/productos/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = path?;
    products::delete(state.db.pool(), id).await?;
    tracing::info!(product_id = id, actor = auth.user_id, "Deleted product");

    Ok(ApiResponse::no_content())
}
