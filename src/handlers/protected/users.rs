// /api/usuarios (GET) and /api/usuarios/:id
//
// Registration (POST /api/usuarios) is public and lives in `public::register`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::user::UserChanges;
use crate::database::models::User;
use crate::database::{users, DatabaseError};
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Merge-patch body: every field optional
#[derive(Debug, Deserialize)]
pub struct UserPatch {
    #[serde(alias = "name")]
    pub nombre: Option<String>,
    #[serde(alias = "email")]
    pub correo: Option<String>,
    #[serde(rename = "contraseña", alias = "contrasena", alias = "password")]
    pub contrasena: Option<String>,
}

/// GET /api/usuarios
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = users::select_all(state.db.pool()).await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/usuarios/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<User> {
    let Path(id) = path?;
    let user = users::select_404(state.db.pool(), id).await?;
    Ok(ApiResponse::success(user))
}

/// PUT /api/usuarios/:id - merge patch
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<User> {
    let Path(id) = path?;
    let Json(payload) = payload?;

    let pool = state.db.pool();
    let current = users::select_404(pool, id).await?;

    let mut errors = FieldErrors::default();
    let nombre = errors.optional_text("nombre", payload.nombre);
    let correo = errors.optional_text("correo", payload.correo);
    let contrasena = errors.optional_text("contraseña", payload.contrasena);
    if !errors.is_empty() {
        return Err(errors.into_error());
    }

    if let Some(correo) = correo.as_deref() {
        if correo != current.correo && users::email_taken(pool, correo, Some(id)).await? {
            return Err(DatabaseError::DuplicateEmail.into());
        }
    }

    let contrasena_hash = match contrasena {
        Some(plain) => Some(state.passwords.hash(&plain)?),
        None => None,
    };

    let changes = UserChanges {
        nombre,
        correo,
        contrasena_hash,
    };
    let user = users::update(pool, id, &changes).await?;

    Ok(ApiResponse::success(user))
}

/// DELETE /api/usuarios/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = path?;
    users::delete(state.db.pool(), id).await?;
    tracing::info!(user_id = id, actor = auth.user_id, "Deleted user");

    Ok(ApiResponse::no_content())
}
