use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller resolved from the bearer token
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Bearer-token gate: rejects the request with 401 before the handler runs
/// unless the token verifies, then exposes the caller as an `AuthUser`.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(|msg| {
        tracing::warn!(path = %request.uri().path(), "Rejected request: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let user_id = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Rejected token: {}", e);
        ApiError::unauthorized(e.to_string())
    })?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty JWT token");
    }

    Ok(token)
}
