use axum::{extract::Extension, Json};

use crate::composer::{ComposeRequest, ComposedMessage};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::middleware::AuthUser;
use crate::services::dispatch_service::{self, DispatchOutcome};

/// POST /api/preview - Compose a message without sending it
pub async fn preview(ApiJson(request): ApiJson<ComposeRequest>) -> Json<ComposedMessage> {
    Json(dispatch_service::preview(request).await)
}

/// POST /api/dispatch - Compose, post to the webhook and log the attempt
///
/// A failed webhook call is still logged (status `Erro`) before the 502.
pub async fn dispatch(
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(request): ApiJson<ComposeRequest>,
) -> ApiResult<Json<DispatchOutcome>> {
    let outcome = dispatch_service::dispatch(request, &auth_user).await?;
    Ok(Json(outcome))
}
