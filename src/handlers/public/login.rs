use axum::Json;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::services::auth_service::{self, LoginRequest, LoginResponse};

/// POST /api/login - Exchange email and password for a bearer token
///
/// Unknown email, wrong password and inactive accounts all answer 401 with
/// the same body.
pub async fn post(ApiJson(request): ApiJson<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let response = auth_service::login(&request).await?;
    Ok(Json(response))
}
