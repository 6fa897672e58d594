pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::AppConfig;
pub use state::AppState;

/// Build the HTTP router. Resource routes live under `/api`; all of them
/// except login and registration sit behind the bearer-token gate.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()));

    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state.clone());

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/login", post(public::login))
        .route("/usuarios", post(public::register))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{categories, products, users};

    Router::new()
        .route("/categorias", get(categories::list).post(categories::create))
        .route(
            "/categorias/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .route("/productos", get(products::list).post(products::create))
        .route(
            "/productos/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/usuarios", get(users::list))
        .route(
            "/usuarios/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
