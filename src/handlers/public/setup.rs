use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::database::schema;
use crate::error::ApiResult;
use crate::services::auth_service;

/// GET /api/setup - Create the tables and seed the bootstrap administrator
///
/// Safe to call repeatedly.
pub async fn get() -> ApiResult<Json<Value>> {
    schema::ensure_schema().await?;
    let admin = auth_service::ensure_bootstrap_admin().await?;

    info!(?admin, "Setup completed");
    Ok(Json(json!({
        "message": "Tables ready",
        "tables": schema::TABLES,
        "admin": admin,
    })))
}
