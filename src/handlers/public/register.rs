// POST /api/usuarios - open registration

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::database::models::User;
use crate::database::{users, DatabaseError};
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "name")]
    pub nombre: Option<String>,
    #[serde(alias = "email")]
    pub correo: Option<String>,
    #[serde(rename = "contraseña", alias = "contrasena", alias = "password")]
    pub contrasena: Option<String>,
}

/// Register a new user. Returns 201 with the user record (never the hash);
/// a duplicate email yields the Conflict error.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(payload) = payload?;

    let mut errors = FieldErrors::default();
    let nombre = errors.require_text("nombre", payload.nombre);
    let correo = errors.require_text("correo", payload.correo);
    let contrasena = errors.require_text("contraseña", payload.contrasena);
    let (Some(nombre), Some(correo), Some(contrasena)) = (nombre, correo, contrasena) else {
        return Err(errors.into_error());
    };

    let pool = state.db.pool();
    if users::email_taken(pool, &correo, None).await? {
        return Err(DatabaseError::DuplicateEmail.into());
    }

    let hash = state.passwords.hash(&contrasena)?;
    let user = users::insert(pool, &nombre, &correo, &hash).await?;
    tracing::info!(user_id = user.id, "Registered user");

    Ok(ApiResponse::created(user))
}
