// /api/categorias and /api/categorias/:id

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::categories;
use crate::database::models::Category;
use crate::error::ApiError;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    #[serde(alias = "name")]
    pub nombre: Option<String>,
}

impl CategoryPayload {
    fn validate(self) -> Result<String, ApiError> {
        let mut errors = FieldErrors::default();
        errors.require_text("nombre", self.nombre).ok_or_else(|| errors.into_error())
    }
}

/// GET /api/categorias
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = categories::select_all(state.db.pool()).await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/categorias/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Category> {
    let Path(id) = path?;
    let category = categories::select_404(state.db.pool(), id).await?;
    Ok(ApiResponse::success(category))
}

/// POST /api/categorias
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> ApiResult<Category> {
    let Json(payload) = payload?;
    let nombre = payload.validate()?;

    let category = categories::insert(state.db.pool(), &nombre).await?;
    tracing::info!(category_id = category.id, actor = auth.user_id, "Created category");

    Ok(ApiResponse::created(category))
}

/// PUT /api/categorias/:id - full replace
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> ApiResult<Category> {
    let Path(id) = path?;
    let Json(payload) = payload?;

    let pool = state.db.pool();
    categories::select_404(pool, id).await?;

    let nombre = payload.validate()?;
    let category = categories::update(pool, id, &nombre).await?;
    Ok(ApiResponse::success(category))
}

/// DELETE /api/categorias/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = path?;
    categories::delete(state.db.pool(), id).await?;
    tracing::info!(category_id = id, actor = auth.user_id, "Deleted category");

    Ok(ApiResponse::no_content())
}
