use axum::Json;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::database::models::setting::INSTANCE_STATUS;
use crate::database::settings;
use crate::services::gateway::{self, InstanceStatus, UpstreamBody};

fn disconnected(configured: bool, reason: impl Into<String>) -> Json<Value> {
    Json(json!({
        "status": InstanceStatus::Disconnected,
        "configured": configured,
        "error": reason.into(),
    }))
}

/// GET /api/whatsapp/status - Ask the gateway whether the instance is connected
///
/// Always answers 200. Missing configuration or an unreachable gateway reads
/// as `disconnected` with an `error` detail.
pub async fn status() -> Json<Value> {
    let stored = match settings::load_settings().await {
        Ok(stored) => stored,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return disconnected(false, "Settings unavailable");
        }
    };

    let server_url = stored.server_url.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let token = stored.instance_token.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let (server_url, token) = match (server_url, token) {
        (Some(server_url), Some(token)) => (server_url, token),
        _ => return disconnected(false, "Server URL and instance token are required"),
    };

    let (status, upstream) = match gateway::instance_status(server_url, token).await {
        Ok(result) => result,
        Err(e) => {
            warn!("WhatsApp status check failed: {}", e);
            return disconnected(true, e.to_string());
        }
    };

    if stored.instance_status.as_deref() != Some(status.as_str()) {
        if let Err(e) = settings::save_setting(INSTANCE_STATUS, status.as_str()).await {
            warn!("Could not store instance status: {}", e);
        }
    }

    let upstream_body = match upstream.body {
        UpstreamBody::Json(value) => value,
        UpstreamBody::Text(text) => Value::String(text),
    };

    Json(json!({
        "status": status,
        "configured": true,
        "upstream": upstream_body,
    }))
}
