// POST /api/login

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::database::users;
use crate::error::ApiError;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Same message for unknown email and wrong password
const BAD_CREDENTIALS: &str = "Correo o contraseña incorrectos";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub correo: Option<String>,
    #[serde(rename = "contraseña", alias = "contrasena", alias = "password")]
    pub contrasena: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Exchange email + password for a bearer token.
///
/// Expected Input:
/// ```json
/// { "correo": "a@x.com", "contraseña": "pw" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;

    let mut errors = FieldErrors::default();
    let correo = errors.require_text("correo", payload.correo);
    let contrasena = errors.require("contraseña", payload.contrasena);
    let (Some(correo), Some(contrasena)) = (correo, contrasena) else {
        return Err(errors.into_error());
    };

    let credentials = users::find_credentials(state.db.pool(), &correo).await?;
    let verified = match &credentials {
        Some(c) => state.passwords.verify(&contrasena, &c.contrasena),
        None => state.passwords.verify_missing(&contrasena),
    };
    let user_id = match credentials {
        Some(c) if verified => c.id,
        _ => {
            tracing::warn!("Failed login attempt");
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }
    };

    let access_token = state.tokens.issue(user_id)?;
    tracing::info!(user_id, "User logged in");

    Ok(ApiResponse::success(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.tokens.ttl_seconds(),
    }))
}
