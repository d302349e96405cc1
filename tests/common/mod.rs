#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use dispatch_console::auth::{self, Claims};
use dispatch_console::database::models::Role;

/// Mint a bearer token without touching the database
pub fn token_for(role: Role) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: 42,
        role,
        name: "Test Agent".to_string(),
        iat: now,
        exp: now + 3600,
    };
    auth::issue_token(&claims).expect("token")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

/// Run one request through the router in-process
pub async fn send(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
    match body {
        Some(body) => send_raw(method, uri, token, Some("application/json"), serde_json::to_vec(&body)?).await,
        None => send_raw(method, uri, token, None, Vec::new()).await,
    }
}

/// Like `send`, with an arbitrary content type and body bytes
pub async fn send_raw(
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let request = builder.body(Body::from(body))?;
    let response = dispatch_console::app().oneshot(request).await?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Ok(TestResponse { status, content_type, body })
}

pub async fn get(uri: &str, token: Option<&str>) -> Result<TestResponse> {
    send(Method::GET, uri, token, None).await
}

pub async fn post(uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
    send(Method::POST, uri, token, Some(body)).await
}

pub async fn put(uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
    send(Method::PUT, uri, token, Some(body)).await
}

/// `DATABASE_URL` is set, so tests that need real rows can run
pub fn database_configured() -> bool {
    std::env::var("DATABASE_URL").map_or(false, |v| !v.trim().is_empty())
}

/// Serve `router` on an ephemeral localhost port; returns its base URL
pub async fn spawn_upstream(router: axum::Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}
