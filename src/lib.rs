pub mod auth;
pub mod cli;
pub mod composer;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::DatabaseManager;
use crate::middleware::jwt_auth_middleware;

/// Full application router: public routes, bearer-protected `/api/*` routes
/// and the global layers.
pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes())
        .layer(DefaultBodyLimit::max(config::config().api.max_request_size_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use handlers::public;

    Router::new()
        .route("/api/login", post(public::login_post))
        .route("/api/setup", get(public::setup_get))
}

fn protected_routes() -> Router {
    use handlers::protected;

    Router::new()
        .route("/api/logs", get(protected::logs_get).post(protected::logs_post))
        .route("/api/logs/stats", get(protected::logs_stats))
        .route("/api/users", get(protected::users_get).post(protected::users_post))
        .route("/api/users/:id", put(protected::user_put).delete(protected::user_delete))
        .route("/api/settings", get(protected::settings_get).put(protected::settings_put))
        .route("/api/proxy-check", post(protected::proxy_post))
        .route("/api/whatsapp/status", get(protected::whatsapp_status))
        .route("/api/templates", get(protected::templates_get))
        .route("/api/preview", post(protected::preview_post))
        .route("/api/dispatch", post(protected::dispatch_post))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Dispatch Console API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": ["/", "/health", "/api/login", "/api/setup"],
            "protected": [
                "/api/logs",
                "/api/logs/stats",
                "/api/users[/:id]",
                "/api/settings",
                "/api/proxy-check",
                "/api/whatsapp/status",
                "/api/templates",
                "/api/preview",
                "/api/dispatch",
            ],
        },
    }))
}

async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database": "unavailable",
                "error": e.to_string(),
            })),
        ),
    }
}
