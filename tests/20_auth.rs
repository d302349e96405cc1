mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use dispatch_console::database::models::Role;
use serde_json::json;

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    for uri in ["/api/logs", "/api/logs/stats", "/api/users", "/api/settings", "/api/templates", "/api/whatsapp/status"] {
        let res = common::get(uri, None).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(res.body["code"], "UNAUTHORIZED");
        assert!(res.body["error"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_rejected() -> Result<()> {
    let res = common::get("/api/templates", Some("not-a-jwt")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn operators_cannot_mutate_users_or_settings() -> Result<()> {
    let token = common::token_for(Role::Operador);

    let res = common::post(
        "/api/users",
        Some(&token),
        json!({ "name": "Ana", "email": "ana@ascel.com", "password": "secret123" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Administrator role required");

    let res = common::send(Method::PUT, "/api/users/7", Some(&token), Some(json!({ "name": "Ana" }))).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = common::send(Method::DELETE, "/api/users/7", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = common::send(Method::PUT, "/api/settings", Some(&token), Some(json!({ "webhookUrl": "https://x" }))).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn supervisors_are_not_administrators() -> Result<()> {
    let token = common::token_for(Role::Supervisor);
    let res = common::send(Method::DELETE, "/api/users/7", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admins_get_validation_errors_before_any_write() -> Result<()> {
    let token = common::token_for(Role::Administrador);

    let res = common::post(
        "/api/users",
        Some(&token),
        json!({ "name": "Ana", "email": "not-an-email", "password": "secret123" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["email"].is_string());

    let res = common::send(Method::PUT, "/api/settings", Some(&token), Some(json!({ "favouriteColour": "red" }))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_with_unknown_credentials_fails() -> Result<()> {
    let res = common::post(
        "/api/login",
        None,
        json!({ "email": "nobody@ascel.com", "password": "wrong-password" }),
    )
    .await?;

    // 401 with a database, 503 without one; never a token
    assert_ne!(res.status, StatusCode::OK);
    assert!(res.body.get("token").is_none());
    if res.status == StatusCode::UNAUTHORIZED {
        assert_eq!(res.body["error"], "Invalid credentials");
    }
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let res = common::post("/api/login", None, json!({ "email": "", "password": "" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}
