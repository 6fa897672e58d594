mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_then_fetch_category() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (status, first) = app.post("/api/categorias", &token, json!({ "nombre": "Bebidas" })).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = app.post("/api/categorias", &token, json!({ "name": "Snacks" })).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(first["id"], second["id"]);

    let id = first["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/api/categorias/{id}"), &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({ "id": id, "nombre": "Bebidas" }));

    let (status, list) = app.get("/api/categorias", &token).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = list.as_array().unwrap().iter().map(|c| c["nombre"].clone()).collect();
    assert_eq!(names, vec![json!("Bebidas"), json!("Snacks")]);

    Ok(())
}

#[tokio::test]
async fn empty_list_is_an_array() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (status, list) = app.get("/api/categorias", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    Ok(())
}

#[tokio::test]
async fn create_requires_a_name() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (status, body) = app.post("/api/categorias", &token, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["nombre"], "This field is required");

    let (status, _) = app.post("/api/categorias", &token, json!({ "nombre": "   " })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.post("/api/categorias", &token, json!({ "nombre": 42 })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");

    Ok(())
}

#[tokio::test]
async fn update_replaces_name() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (_, created) = app.post("/api/categorias", &token, json!({ "nombre": "Viejo" })).await?;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app
        .put(&format!("/api/categorias/{id}"), &token, json!({ "nombre": "Nuevo" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "id": id, "nombre": "Nuevo" }));

    let (status, _) = app.put(&format!("/api/categorias/{id}"), &token, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (status, body) = app.get("/api/categorias/999", &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.put("/api/categorias/999", &token, json!({ "nombre": "x" })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown id wins over a missing name
    let (status, body) = app.put("/api/categorias/999", &token, json!({})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.delete("/api/categorias/999", &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/categorias/abc", &token).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn delete_returns_no_content_once() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (_, created) = app.post("/api/categorias", &token, json!({ "nombre": "Temporal" })).await?;
    let uri = format!("/api/categorias/{}", created["id"]);

    let (status, body) = app.delete(&uri, &token).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.delete(&uri, &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&uri, &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
