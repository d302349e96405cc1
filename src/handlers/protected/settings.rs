use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::database::models::Settings;
use crate::database::settings;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::middleware::AuthUser;

/// GET /api/settings - Stored settings; `{}` if the store is down
pub async fn get() -> Json<Settings> {
    match settings::load_settings().await {
        Ok(settings) => Json(settings),
        Err(e) => {
            error!("Failed to load settings: {}", e);
            Json(Settings::default())
        }
    }
}

fn parse_settings(body: Value) -> Result<Settings, ApiError> {
    if !body.is_object() {
        return Err(ApiError::bad_request("Settings must be a JSON object"));
    }
    serde_json::from_value(body).map_err(|e| ApiError::validation_error(format!("Invalid settings: {}", e), None))
}

/// PUT /api/settings - Upsert the supplied keys (administrators only)
///
/// Keys left out of the body keep their stored values.
pub async fn put(
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<Value>> {
    auth_user.require_admin()?;

    let settings = parse_settings(body)?;
    if settings.is_empty() {
        return Err(ApiError::bad_request("No settings supplied"));
    }

    let changed = settings::save_settings(&settings).await?;
    info!(changed, by = auth_user.user_id, "Settings saved");
    Ok(Json(json!({ "message": "Settings saved", "changed": changed })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_settings(json!({ "webhookUrl": "https://x", "colour": "red" })).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn known_keys_parse() {
        let settings = parse_settings(json!({ "webhookUrl": "https://x", "actionButtonDisabled": true })).unwrap();
        assert_eq!(settings.webhook(), Some("https://x"));
        assert!(settings.action_button_disabled());
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(parse_settings(json!(["webhookUrl"])).is_err());
    }
}
