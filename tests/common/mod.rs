#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_api::{app, AppConfig, AppState};

/// Router over a private in-memory store, driven in-process.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub async fn spawn_app() -> Result<TestApp> {
    let state = AppState::from_config(AppConfig::testing())
        .await
        .context("failed to build test state")?;
    let router = app(state.clone());
    Ok(TestApp { router, state })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| {
                format!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
            })?
        };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, nombre: &str, correo: &str, password: &str) -> Result<(StatusCode, Value)> {
        let body = json!({ "nombre": nombre, "correo": correo, "contraseña": password });
        self.request(Method::POST, "/api/usuarios", None, Some(body)).await
    }

    pub async fn login(&self, correo: &str, password: &str) -> Result<(StatusCode, Value)> {
        let body = json!({ "correo": correo, "contraseña": password });
        self.request(Method::POST, "/api/login", None, Some(body)).await
    }

    /// Register a user and return a bearer token for it.
    pub async fn token(&self) -> Result<String> {
        let (status, _) = self.register("Tester", "tester@example.com", "secret").await?;
        anyhow::ensure!(status == StatusCode::CREATED, "registration failed: {status}");

        let (status, body) = self.login("tester@example.com", "secret").await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {status}");

        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("login response without access_token")
    }
}

/// Prices travel as JSON floats; compare at cent precision.
pub fn assert_price(value: &Value, expected: f64) {
    let actual = value
        .as_f64()
        .unwrap_or_else(|| panic!("price is not a number: {value}"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "price {actual} != {expected}"
    );
}
