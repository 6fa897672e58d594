mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn registration_never_returns_the_password() -> Result<()> {
    let app = common::spawn_app().await?;

    let (status, user) = app.register("Ana", "a@x.com", "pw").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user["id"].is_i64());
    assert_eq!(user["nombre"], "Ana");
    assert_eq!(user["correo"], "a@x.com");

    let created_at = user["creado_en"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());

    let fields: Vec<_> = user.as_object().unwrap().keys().cloned().collect();
    assert_eq!(fields.len(), 4, "unexpected fields: {fields:?}");

    Ok(())
}

#[tokio::test]
async fn registration_accepts_english_field_names() -> Result<()> {
    let app = common::spawn_app().await?;

    let (status, user) = app
        .request(
            axum::http::Method::POST,
            "/api/usuarios",
            None,
            Some(json!({ "name": "Ana", "correo": "a@x.com", "contraseña": "pw" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["nombre"], "Ana");

    let (status, _) = app.login("a@x.com", "pw").await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_second_record() -> Result<()> {
    let app = common::spawn_app().await?;

    let (status, _) = app.register("Ana", "a@x.com", "pw").await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.register("Otra Ana", "a@x.com", "pw2").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(body["msg"], "Correo ya registrado");

    let (_, login) = app.login("a@x.com", "pw").await?;
    let token = login["access_token"].as_str().unwrap();
    let (_, list) = app.get("/api/usuarios", token).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["nombre"], "Ana");

    Ok(())
}

#[tokio::test]
async fn registration_requires_all_fields() -> Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app
        .request(
            axum::http::Method::POST,
            "/api/usuarios",
            None,
            Some(json!({ "nombre": "Ana" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["correo"], "This field is required");
    assert_eq!(body["field_errors"]["contraseña"], "This field is required");

    Ok(())
}

#[tokio::test]
async fn update_is_a_merge_patch() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (_, user) = app.register("Ana", "a@x.com", "pw").await?;
    let uri = format!("/api/usuarios/{}", user["id"]);

    let (status, updated) = app.put(&uri, &token, json!({ "nombre": "Ana María" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nombre"], "Ana María");
    assert_eq!(updated["correo"], "a@x.com");
    assert_eq!(updated["creado_en"], user["creado_en"]);

    let (status, updated) = app.put(&uri, &token, json!({ "correo": "ana@x.com" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nombre"], "Ana María");
    assert_eq!(updated["correo"], "ana@x.com");

    // Keeping one's own email is not a conflict
    let (status, _) = app.put(&uri, &token, json!({ "correo": "ana@x.com" })).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.put(&uri, &token, json!({})).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn password_change_is_rehashed() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (_, user) = app.register("Ana", "a@x.com", "old").await?;
    let uri = format!("/api/usuarios/{}", user["id"]);

    let (status, updated) = app.put(&uri, &token, json!({ "contraseña": "new" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(updated.get("contraseña").is_none());

    let (status, _) = app.login("a@x.com", "old").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.login("a@x.com", "new").await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn email_change_to_taken_address_conflicts() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (_, user) = app.register("Ana", "a@x.com", "pw").await?;
    let uri = format!("/api/usuarios/{}", user["id"]);

    let (status, body) = app.put(&uri, &token, json!({ "correo": "tester@example.com" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (_, fetched) = app.get(&uri, &token).await?;
    assert_eq!(fetched["correo"], "a@x.com");

    Ok(())
}

#[tokio::test]
async fn unknown_user_is_not_found() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (status, _) = app.get("/api/usuarios/999", &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.put("/api/usuarios/999", &token, json!({ "nombre": "x" })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/usuarios/999", &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn delete_user() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token().await?;

    let (_, user) = app.register("Ana", "a@x.com", "pw").await?;
    let uri = format!("/api/usuarios/{}", user["id"]);

    let (status, body) = app.delete(&uri, &token).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&uri, &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.login("a@x.com", "pw").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
